use nalgebra::{matrix, vector, Matrix4, Point3, Vector3};

use crate::{
    common::lerp_range,
    error::{RenderError, Result},
};

use super::{CameraParams, Projection};

/// Camera aimed at a target point.
///
/// View space has the eye in the origin, `u` to the right, `v` up and the viewer
/// looking down the negative `n` axis. The image plane passes through the look-at
/// point, `dist` units in front of the eye.
#[derive(Debug, Clone)]
pub struct Camera {
    params: CameraParams,
    u: Vector3<f32>,
    v: Vector3<f32>,
    n: Vector3<f32>,
    dist: f32,
    view_to_world: Matrix4<f32>,
    near_clip_view: f32,
    far_clip_view: f32,
    plane_width: f32,
    plane_height: f32,
}

impl Camera {
    pub fn new(params: CameraParams) -> Result<Camera> {
        if !(params.fov_degrees > 0.0 && params.fov_degrees < 180.0) {
            return Err(RenderError::InvalidParameter(format!(
                "field of view must be in (0, 180) degrees, got {}",
                params.fov_degrees
            )));
        }

        let eye_minus_at = params.eye - params.look_at;
        let dist = eye_minus_at.norm();
        let n = eye_minus_at
            .try_normalize(f32::EPSILON)
            .ok_or(RenderError::DegenerateCameraBasis)?;

        let up_cross_n = params.up.cross(&n);
        let u = up_cross_n
            .try_normalize(f32::EPSILON * params.up.norm().max(1.0))
            .ok_or(RenderError::DegenerateCameraBasis)?;
        let v = n.cross(&u);

        let eye = params.eye;
        // cam to world matrix
        let view_to_world = matrix![u.x, v.x, n.x, eye.x;
                                    u.y, v.y, n.y, eye.y;
                                    u.z, v.z, n.z, eye.z;
                                    0.0, 0.0, 0.0, 1.0];

        let near_clip_view = params.near + dist;
        let far_clip_view = params.far + dist;
        if far_clip_view <= near_clip_view {
            log::warn!("Camera clip range is empty ({near_clip_view} to {far_clip_view}), nothing will be sampled");
        }

        let plane_height = 2.0 * dist * (params.fov_degrees.to_radians() / 2.0).tan();
        let plane_width = params.aspect * plane_height;

        Ok(Camera {
            params,
            u,
            v,
            n,
            dist,
            view_to_world,
            near_clip_view,
            far_clip_view,
            plane_width,
            plane_height,
        })
    }

    /// View-space position of the centre of pixel `(row, col)` on the image plane.
    ///
    /// `row` runs left to right over the horizontal pixel count,
    /// `col` top to bottom over the vertical one.
    pub fn pixel_to_view_ray(&self, row: usize, col: usize) -> Vector3<f32> {
        let (size_h, size_v) = self.params.pixel_dims;
        let x = (self.plane_width / 2.0)
            * lerp_range(-1.0, 1.0, -0.5, row as f32, size_h as f32 - 0.5);
        let y = (self.plane_height / 2.0)
            * lerp_range(1.0, -1.0, -0.5, col as f32, size_v as f32 - 0.5);
        vector![x, y, -self.dist]
    }

    /// Orthonormal basis `(u, v, n)` in world space.
    pub fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        (self.u, self.v, self.n)
    }

    /// Matrix M, M * view_space = world_space
    pub fn view_to_world(&self) -> &Matrix4<f32> {
        &self.view_to_world
    }

    pub fn to_world(&self, view: &Point3<f32>) -> Point3<f32> {
        self.view_to_world.transform_point(view)
    }

    /// Unit vector from the look-at point towards the eye.
    pub fn get_n(&self) -> Vector3<f32> {
        self.n
    }

    pub fn get_position(&self) -> Point3<f32> {
        self.params.eye
    }

    /// Distance between eye and look-at point.
    pub fn dist(&self) -> f32 {
        self.dist
    }

    /// Distance of the near clipping plane from the eye.
    pub fn near_clip_view(&self) -> f32 {
        self.near_clip_view
    }

    /// Distance of the far clipping plane from the eye.
    pub fn far_clip_view(&self) -> f32 {
        self.far_clip_view
    }

    /// Physical width and height of the image plane.
    pub fn plane_size(&self) -> (f32, f32) {
        (self.plane_width, self.plane_height)
    }

    pub fn pixel_dims(&self) -> (usize, usize) {
        self.params.pixel_dims
    }

    pub fn projection(&self) -> Projection {
        self.params.projection
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }
}
