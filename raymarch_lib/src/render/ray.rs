use nalgebra::{Point3, Vector3};

use crate::{
    camera::Projection,
    color::{self, RGBA},
    common::{lerp, unlerp},
    light::blinn_phong,
    volumetric::Convolution,
};

use super::{Composite, RenderContext};

/// Why a ray stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Passed the far clipping plane
    FarClip,
    /// Accumulated opacity saturated
    Opaque,
}

/// Lifecycle of a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchState {
    Start,
    Stepping,
    Done(Termination),
}

/// Marches one ray at a time through the volume.
///
/// Owned by a single worker and reset for every pixel by [`RayMarcher::start`].
#[derive(Debug, Clone)]
pub struct RayMarcher {
    state: MarchState,
    sample_idx: usize,
    /// View-space offset between samples
    step_view: Vector3<f32>,
    step_view_len: f32,
    pos_view_init: Vector3<f32>,
    pos_world_init: Point3<f32>,
    composite: Composite,
}

impl Default for RayMarcher {
    fn default() -> Self {
        Self {
            state: MarchState::Start,
            sample_idx: 0,
            step_view: Vector3::zeros(),
            step_view_len: 0.0,
            pos_view_init: Vector3::zeros(),
            pos_world_init: Point3::origin(),
            composite: Composite::new(color::zero()),
        }
    }
}

impl RayMarcher {
    pub fn new() -> RayMarcher {
        RayMarcher::default()
    }

    /// March the ray of pixel `(row, col)` to the end and return its colour.
    pub fn go(
        &mut self,
        row: usize,
        col: usize,
        convolution: &mut Convolution,
        ctx: &RenderContext,
    ) -> RGBA {
        self.start(row, col, ctx);
        while self.step(convolution, ctx) {}
        self.composite.result()
    }

    /// Set up the ray through pixel `(row, col)`.
    pub fn start(&mut self, row: usize, col: usize, ctx: &RenderContext) {
        let camera = ctx.camera;
        let ray_img = camera.pixel_to_view_ray(row, col);

        match camera.projection() {
            Projection::Orthographic => {
                self.pos_view_init = Vector3::new(ray_img.x, ray_img.y, -camera.near_clip_view());
                self.step_view = Vector3::new(0.0, 0.0, -ctx.plane_sep);
            }
            Projection::Perspective => {
                self.pos_view_init = ray_img * (camera.near_clip_view() / camera.dist());
                self.step_view = ray_img * (ctx.plane_sep / camera.dist());
            }
        }
        self.step_view_len = self.step_view.norm();
        self.pos_world_init = camera.to_world(&Point3::from(self.pos_view_init));

        self.sample_idx = 0;
        self.composite = Composite::new(ctx.outside_val);
        self.state = MarchState::Stepping;
    }

    /// Take one sample.
    /// Returns `false` once the ray is done.
    pub fn step(&mut self, convolution: &mut Convolution, ctx: &RenderContext) -> bool {
        if self.state != MarchState::Stepping {
            return false;
        }

        let camera = ctx.camera;
        let pos_view = self.pos_view_init + self.step_view * self.sample_idx as f32;
        if -pos_view.z > camera.far_clip_view() {
            self.state = MarchState::Done(Termination::FarClip);
            return false;
        }
        self.sample_idx += 1;

        let pos_world = camera.to_world(&Point3::from(pos_view));

        // near the border of the volume, skip sample
        let probe = match convolution.evaluate(&pos_world, ctx) {
            Some(p) => p,
            None => return true,
        };

        let tf = ctx.transfer_function;
        let rgba = tf.lookup(probe.value);
        let opacity = tf.correct_opacity(rgba.w, self.step_view_len);
        let rgb = rgba.xyz();

        // fully transparent sample cannot change the composite, no need to shade
        let rgb_lit = if opacity == 0.0 {
            rgb
        } else {
            let viewer_dir = match camera.projection() {
                Projection::Orthographic => camera.get_n(),
                Projection::Perspective => (self.pos_world_init - pos_world)
                    .try_normalize(0.0)
                    .or_else(|| (camera.get_position() - pos_world).try_normalize(0.0))
                    .unwrap_or_else(|| camera.get_n()),
            };
            blinn_phong(&rgb, &probe.gradient, &viewer_dir, ctx.lights)
        };

        // depth cueing
        let params = ctx.lights.params();
        let (near, far) = (camera.near_clip_view(), camera.far_clip_view());
        let gamma = if far > near {
            unlerp(near, -pos_view.z, far)
        } else {
            0.0
        };
        let tint = lerp(params.depth_color_near(), params.depth_color_far(), gamma);
        let rgb_cued = rgb_lit.component_mul(&tint);

        let current = color::new(rgb_cued.x, rgb_cued.y, rgb_cued.z, opacity);

        let keep_going = self.composite.blend(current, tf.alpha_near_one());
        if !keep_going {
            self.state = MarchState::Done(Termination::Opaque);
        }
        keep_going
    }

    pub fn state(&self) -> MarchState {
        self.state
    }

    /// Number of samples taken so far, including those outside the volume.
    pub fn samples_taken(&self) -> usize {
        self.sample_idx
    }

    pub fn result(&self) -> RGBA {
        self.composite.result()
    }

    /// Length of the step between samples, in world units.
    pub fn step_len(&self) -> f32 {
        self.step_view_len
    }
}
