// CONTROLLER: parameter intake and the update loop
pub mod config;
pub mod frame_loop;

pub use config::{ConfigFields, DemoParams, DemoScene, Field, FieldBuffers, Viewport};
pub use frame_loop::{FrameScheduler, FrameStats, LoopState, ManualScheduler, SimulationContext, TickOutcome};
