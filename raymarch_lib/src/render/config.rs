//! Render configuration read from JSON.

use std::ops::Range;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

use crate::{
    camera::{Camera, CameraParams, Projection},
    color::RGBA,
    error::{RenderError, Result},
    light::{LightParams, LightSet},
    TransferFunction,
};

use super::RenderOptions;

/// Camera part of [`RenderConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Horizontal and vertical pixel count
    pub pixel_dims: [usize; 2],
    /// Defaults to the pixel aspect ratio
    #[serde(default)]
    pub aspect: Option<f32>,
    #[serde(default = "default_projection")]
    pub projection: Projection,
}

fn default_projection() -> Projection {
    Projection::Perspective
}

fn default_alpha_near_one() -> f32 {
    0.99
}

/// Everything needed to render, apart from the volume, transfer function table and lights.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    /// March step along the viewing axis
    pub plane_sep: f32,
    /// Step length the transfer function opacities were designed for
    pub unit_step: f32,
    #[serde(default = "default_alpha_near_one")]
    pub alpha_near_one: f32,
    /// Pixel value of rays missing the volume
    #[serde(default)]
    pub outside_val: [f32; 4],
    /// Worker threads, 0 renders on the calling thread
    #[serde(default)]
    pub num_threads: usize,
    #[serde(default)]
    pub lighting: LightParams,
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<RenderConfig> {
        let config: RenderConfig = serde_json::from_str(text)?;
        log::debug!("Loaded render config {config:?}");
        Ok(config)
    }

    pub fn camera(&self) -> Result<Camera> {
        let cam = &self.camera;
        let [width, height] = cam.pixel_dims;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidParameter(format!(
                "pixel dimensions must be non-zero, got {width}x{height}"
            )));
        }

        let aspect = cam.aspect.unwrap_or(width as f32 / height as f32);
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }

        Camera::new(CameraParams {
            eye: Point3::from(cam.eye),
            look_at: Point3::from(cam.look_at),
            up: Vector3::from(cam.up),
            near: cam.near,
            far: cam.far,
            fov_degrees: cam.fov,
            pixel_dims: (width, height),
            aspect,
            projection: cam.projection,
        })
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        RenderOptions::builder()
            .plane_sep(self.plane_sep)
            .outside_val(RGBA::from(self.outside_val))
            .num_threads(self.num_threads)
            .build()
    }

    /// Transfer function over `domain` using the configured unit step and termination threshold.
    pub fn transfer_function(
        &self,
        table: Vec<RGBA>,
        domain: Range<f32>,
    ) -> Result<TransferFunction> {
        TransferFunction::new(table, domain, self.unit_step, self.alpha_near_one)
    }

    /// Parse light records and move view-space lights into world space of `camera`.
    pub fn lights(&self, records: &str, camera: &Camera) -> Result<LightSet> {
        Ok(LightSet::from_records(records, self.lighting)?.to_world(camera))
    }
}
