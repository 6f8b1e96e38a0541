mod composite;
mod config;
mod context;
mod image;
mod ray;
mod render_options;
mod renderer;
mod scheduler;

pub use composite::Composite;
pub use config::{CameraConfig, RenderConfig};
pub use context::RenderContext;
pub use image::Image;
pub use ray::{MarchState, RayMarcher, Termination};
pub use render_options::{RenderOptions, RenderOptionsBuilder};
pub use renderer::Renderer;
pub use scheduler::{render_parallel, render_serial, PixelCursor};
