//! Direct volume rendering by ray marching.
//!
//! For every pixel a ray is cast through a scalar field, the field is reconstructed with
//! a smooth kernel, samples are classified by a transfer function, shaded with
//! Blinn-Phong and composited front to back.
//!
//! ```no_run
//! # use raymarch_lib::{color, kernel::CubicBSpline, light::LightSet, render::*,
//! #     volumetric::VolumeGrid, TransferFunction};
//! # use nalgebra::vector;
//! # fn main() -> raymarch_lib::Result<()> {
//! let config = RenderConfig::from_json(r#"{
//!     "camera": { "eye": [1.5, 1.5, 10], "look_at": [1.5, 1.5, 0], "up": [0, 1, 0],
//!                 "near": -9, "far": 1, "fov": 10, "pixel_dims": [8, 8],
//!                 "projection": "orthographic" },
//!     "plane_sep": 0.25, "unit_step": 0.25
//! }"#)?;
//! let camera = config.camera()?;
//! let volume = VolumeGrid::with_identity(vector![4, 4, 4], vec![5.0; 64])?;
//! let tf = config.transfer_function(vec![color::new(1.0, 0.0, 0.0, 1.0)], 0.0..10.0)?;
//! let lights = LightSet::new(vec![], config.lighting);
//! let options = config.render_options()?;
//!
//! let ctx = RenderContext::new(&camera, &volume, &CubicBSpline, &tf, &lights, &options)?;
//! let image = Renderer::new(ctx).render()?;
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod common;
mod error;
pub mod kernel;
pub mod light;
pub mod render;
pub mod test_helpers;
mod transfer_function;
pub mod volumetric;

pub use error::{RenderError, Result};
pub use transfer_function::TransferFunction;

pub mod color {
    use nalgebra::{vector, Vector4};

    pub type RGBA = Vector4<f32>;

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
        vector![r, g, b, a]
    }

    pub fn zero() -> RGBA {
        vector![0.0, 0.0, 0.0, 0.0]
    }

    pub fn mono(v: f32, opacity: f32) -> RGBA {
        vector![v, v, v, opacity]
    }
}
