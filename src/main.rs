use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::{event::*, event_loop::EventLoop, window::Window};

use shmdemo::controller::config::{self, SurfaceChange, Viewport};
use shmdemo::controller::frame_loop;
use shmdemo::controller::{FieldBuffers, ManualScheduler, SimulationContext};
use shmdemo::view::{DisplayList, DrawCommand, GpuContext};
use shmdemo::{logging, ui};

struct App {
    gpu: GpuContext,
    window: Arc<Window>,

    // egui
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Simulation, driven one tick per redraw
    sim: Rc<RefCell<SimulationContext>>,
    display: Rc<RefCell<DisplayList>>,
    scheduler: Rc<ManualScheduler>,
    fields: FieldBuffers,
    last_frame: Vec<DrawCommand>,
    reconfigure_pending: bool,
    started: Instant,
}

/// Window size in logical pixels, minus the parameter strip
fn viewport_of(window: &Window) -> Viewport {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    Viewport::from_host(size.width, size.height)
}

impl App {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;
        let gpu = GpuContext::new(&instance, surface, size.width, size.height).await?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut fields = FieldBuffers::new();
        let scene = config::intake(&mut fields, viewport_of(&window));
        let sim = Rc::new(RefCell::new(SimulationContext::new(scene)));
        let display = Rc::new(RefCell::new(DisplayList::new()));
        let scheduler = Rc::new(ManualScheduler::new());
        frame_loop::run(sim.clone(), display.clone(), scheduler.clone());

        Ok(Self {
            gpu,
            window,
            egui_renderer,
            egui_state,
            egui_ctx,
            sim,
            display,
            scheduler,
            fields,
            last_frame: Vec::new(),
            reconfigure_pending: false,
            started: Instant::now(),
        })
    }

    /// Returns true when egui consumed the event
    fn input(&mut self, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Rebuild the surface; a real window resize also reapplies the configuration
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>, change: SurfaceChange) {
        self.gpu.resize(new_size.width, new_size.height);
        if change.needs_intake() {
            self.reconfigure_pending = true;
        }
    }

    fn reconfigure(&mut self) {
        let scene = config::intake(&mut self.fields, viewport_of(&self.window));
        self.sim.borrow_mut().reconfigure(scene);
        self.reconfigure_pending = false;
    }

    /// Run the pending simulation tick and keep what it drew
    fn tick(&mut self) {
        if self.reconfigure_pending {
            self.reconfigure();
        }

        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if !self.scheduler.fire(now_ms) {
            tracing::warn!("no tick was scheduled for this frame");
        }

        let recorded = self.display.borrow_mut().take();
        if !recorded.is_empty() {
            self.last_frame = recorded;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let stats = self.sim.borrow().stats();
        let mut actions = ui::UiActions::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            actions = ui::build_ui(ctx, &mut self.fields, &self.last_frame, stats);
        });
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = self.gpu.device.as_ref();
        let queue = self.gpu.queue.as_ref();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let user_buffers = self
            .egui_renderer
            .update_buffers(device, queue, &mut encoder, &primitives, &screen_descriptor);

        {
            let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        // applied after the tick that produced this frame, before the next one
        if actions.update_requested {
            self.reconfigure();
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window_attributes = Window::default_attributes()
        .with_title("SHM Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
    #[allow(deprecated)]
    let window = Arc::new(
        event_loop
            .create_window(window_attributes)
            .context("failed to create window")?,
    );

    let mut app = pollster::block_on(App::new(window))?;
    tracing::info!("shm demo started");

    #[allow(deprecated)]
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { ref event, window_id } if window_id == app.window.id() => {
            if app.input(event) {
                return;
            }
            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    app.resize(*physical_size, SurfaceChange::WindowResized)
                }
                WindowEvent::RedrawRequested => {
                    app.tick();
                    match app.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = app.window.inner_size();
                            app.resize(size, SurfaceChange::SurfaceLost);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("GPU out of memory, exiting");
                            elwt.exit();
                        }
                        Err(e) => tracing::warn!(?e, "frame dropped"),
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => app.window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
