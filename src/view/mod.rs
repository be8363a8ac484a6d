// VIEW: drawing surfaces and rendering
pub mod surface;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_painter;
#[cfg(not(target_arch = "wasm32"))]
pub mod gpu_init;

pub use surface::{Color, DisplayList, DrawCommand, DrawSurface};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(not(target_arch = "wasm32"))]
pub use gpu_init::GpuContext;
