//! Directional lights and Blinn-Phong shading.

mod parse;
mod shading;

pub use parse::parse_lights;
pub use shading::blinn_phong;

use nalgebra::{vector, Vector3};
use serde::Deserialize;

use crate::{
    camera::Camera,
    error::{RenderError, Result},
};

/// Directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vector3<f32>,
    /// Normalized direction towards the light
    pub direction: Vector3<f32>,
    /// Direction is given in view space and must be rotated into world space before rendering
    pub view_space: bool,
}

impl Light {
    /// World-space light, `direction` is normalized.
    ///
    /// Fails on zero-length or non-finite direction.
    pub fn new(color: Vector3<f32>, direction: Vector3<f32>) -> Result<Light> {
        let direction = direction
            .try_normalize(f32::EPSILON)
            .filter(|d| d.iter().all(|c| c.is_finite()))
            .ok_or_else(|| {
                RenderError::InvalidParameter(format!(
                    "light direction must be finite and non-zero, got {direction:?}"
                ))
            })?;
        Ok(Light {
            color,
            direction,
            view_space: false,
        })
    }

    /// Direction is a finite unit vector.
    pub fn is_valid(&self) -> bool {
        self.direction.iter().all(|c| c.is_finite()) && (self.direction.norm() - 1.0).abs() < 1e-3
    }
}

/// Lighting coefficients and depth cueing colours.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightParams {
    pub k_ambient: f32,
    pub k_diffuse: f32,
    pub k_specular: f32,
    pub shininess: f32,
    /// Tint of samples at the near clipping plane
    pub depth_color_near: [f32; 3],
    /// Tint of samples at the far clipping plane
    pub depth_color_far: [f32; 3],
}

impl LightParams {
    /// Only the ambient term, with weight 1.
    pub fn ambient_only() -> LightParams {
        LightParams {
            k_ambient: 1.0,
            k_diffuse: 0.0,
            k_specular: 0.0,
            ..Default::default()
        }
    }

    pub fn depth_color_near(&self) -> Vector3<f32> {
        Vector3::from(self.depth_color_near)
    }

    pub fn depth_color_far(&self) -> Vector3<f32> {
        Vector3::from(self.depth_color_far)
    }
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            k_ambient: 0.2,
            k_diffuse: 0.8,
            k_specular: 0.1,
            shininess: 150.0,
            depth_color_near: [1.0, 1.0, 1.0],
            depth_color_far: [1.0, 1.0, 1.0],
        }
    }
}

/// Lights of the scene together with shading parameters.
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    lights: Vec<Light>,
    params: LightParams,
}

impl LightSet {
    pub fn new(lights: Vec<Light>, params: LightParams) -> LightSet {
        LightSet { lights, params }
    }

    /// Parse light records, see [`parse_lights`].
    pub fn from_records(text: &str, params: LightParams) -> Result<LightSet> {
        let lights = parse_lights(text)?;
        Ok(LightSet { lights, params })
    }

    /// Rotate view-space lights into world space using the basis of `camera`.
    pub fn to_world(mut self, camera: &Camera) -> LightSet {
        let (u, v, n) = camera.basis();
        for light in self.lights.iter_mut().filter(|l| l.view_space) {
            let d = light.direction;
            light.direction = (u * d.x + v * d.y + n * d.z).normalize();
            light.view_space = false;
            log::warn!("View-space light moved to world direction {:?}", light.direction);
        }
        self
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn params(&self) -> &LightParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Any light still waiting for [`LightSet::to_world`].
    pub fn has_view_space(&self) -> bool {
        self.lights.iter().any(|l| l.view_space)
    }
}

/// White light shining from `direction`.
pub fn white_light(direction: Vector3<f32>) -> Result<Light> {
    Light::new(vector![1.0, 1.0, 1.0], direction)
}
