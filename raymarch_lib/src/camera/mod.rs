mod target_camera;

pub use target_camera::Camera;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// How rays leave the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Parallel rays along the viewing direction
    Orthographic,
    /// Rays diverge from the eye
    Perspective,
}

/// Parameters a [`Camera`] is built from.
#[derive(Debug, Clone, Copy)]
pub struct CameraParams {
    pub eye: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Near clipping plane, offset from the look-at point along the viewing axis
    pub near: f32,
    /// Far clipping plane, offset from the look-at point along the viewing axis
    pub far: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Number of pixels, horizontally and vertically
    pub pixel_dims: (usize, usize),
    /// Width of the image plane divided by its height
    pub aspect: f32,
    pub projection: Projection,
}
