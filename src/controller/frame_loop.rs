use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::config::{DemoScene, Viewport};
use crate::model::{Oscillator, Spinner};
use crate::view::render;
use crate::view::DrawSurface;

/// Frames longer than this (seconds) are treated as a stall and not simulated
pub const LAG_THRESHOLD: f64 = 0.025;

/// Callback run on the next host frame with the frame timestamp in milliseconds
pub type TickCallback = Box<dyn FnOnce(f64)>;

/// Host frame-callback primitive (`requestAnimationFrame`, a winit redraw, a test)
pub trait FrameScheduler {
    fn schedule_next_tick(&self, callback: TickCallback);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// What a single tick did to the physics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// First tick: time base recorded, nothing simulated
    Started,
    Advanced { dt: f64 },
    LagSkipped { frame_length: f64 },
}

/// Counters shown in the native debug window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub ticks: u64,
    pub lag_skips: u64,
    pub last_frame_length: f64,
}

impl FrameStats {
    pub fn fps(&self) -> f64 {
        if self.last_frame_length > 0.0 {
            1.0 / self.last_frame_length
        } else {
            0.0
        }
    }
}

/// Everything one running demo owns: both models, the drawing area and timing
pub struct SimulationContext {
    pub oscillator: Oscillator,
    pub spinner: Spinner,
    pub viewport: Viewport,
    state: LoopState,
    last_time_ms: f64,
    stats: FrameStats,
}

impl SimulationContext {
    pub fn new(scene: DemoScene) -> Self {
        Self {
            oscillator: scene.oscillator,
            spinner: scene.spinner,
            viewport: scene.viewport,
            state: LoopState::Idle,
            last_time_ms: 0.0,
            stats: FrameStats::default(),
        }
    }

    /// Swap in freshly built models. Timing carries on, so the next tick is a
    /// normal one.
    pub fn reconfigure(&mut self, scene: DemoScene) {
        self.oscillator = scene.oscillator;
        self.spinner = scene.spinner;
        self.viewport = scene.viewport;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Physics half of a tick
    pub fn advance(&mut self, now_ms: f64) -> TickOutcome {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.last_time_ms = now_ms;
            tracing::info!("frame loop running");
            return TickOutcome::Started;
        }

        // non-monotonic host clocks give a zero-length tick
        let frame_length = ((now_ms - self.last_time_ms) * 0.001).max(0.0);
        self.last_time_ms = now_ms;
        self.stats.ticks += 1;
        self.stats.last_frame_length = frame_length;

        if frame_length > LAG_THRESHOLD {
            self.stats.lag_skips += 1;
            tracing::debug!(frame_length, "frame too long, skipping physics");
            return TickOutcome::LagSkipped { frame_length };
        }

        self.oscillator.update(frame_length);
        self.spinner.update(frame_length);
        TickOutcome::Advanced { dt: frame_length }
    }

    /// Full tick: simulate, clear and redraw
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn DrawSurface) -> TickOutcome {
        let outcome = self.advance(now_ms);
        surface.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        render::draw_scene(surface, &self.oscillator, &self.spinner);
        outcome
    }
}

/// Start the endless tick chain: each tick draws and then asks the scheduler
/// for the next one.
pub fn run<D, S>(ctx: Rc<RefCell<SimulationContext>>, surface: Rc<RefCell<D>>, scheduler: Rc<S>)
where
    D: DrawSurface + 'static,
    S: FrameScheduler + 'static,
{
    let next = scheduler.clone();
    scheduler.schedule_next_tick(Box::new(move |now_ms| {
        ctx.borrow_mut().tick(now_ms, &mut *surface.borrow_mut());
        run(ctx, surface, next);
    }));
}

/// Scheduler holding at most one pending tick until someone calls [`fire`].
///
/// Drives the loop from tests with synthetic timestamps and from the native
/// event loop on each redraw.
///
/// [`fire`]: ManualScheduler::fire
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Option<TickCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Run the pending tick, if any. Returns whether one ran.
    pub fn fire(&self, now_ms: f64) -> bool {
        // take first: the callback reschedules into the same slot
        let callback = self.pending.borrow_mut().take();
        match callback {
            Some(cb) => {
                cb(now_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_tick(&self, callback: TickCallback) {
        let replaced = self.pending.borrow_mut().replace(callback);
        if replaced.is_some() {
            tracing::warn!("dropping a pending tick, only one may be queued");
        }
    }
}
