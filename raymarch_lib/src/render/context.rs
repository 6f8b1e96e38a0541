use crate::{
    camera::Camera,
    color::RGBA,
    error::{RenderError, Result},
    kernel::Kernel,
    light::LightSet,
    volumetric::VolumeGrid,
    TransferFunction,
};

use super::RenderOptions;

/// Everything a ray needs, shared read-only by all workers.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    pub volume: &'a VolumeGrid,
    pub kernel: &'a dyn Kernel,
    pub transfer_function: &'a TransferFunction,
    pub lights: &'a LightSet,
    /// March step along the viewing axis
    pub plane_sep: f32,
    pub outside_val: RGBA,
    pub num_threads: usize,
    /// First neighbour offset of the kernel
    pub idx_start: i32,
    /// Last neighbour offset of the kernel, inclusive
    pub idx_end: i32,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        camera: &'a Camera,
        volume: &'a VolumeGrid,
        kernel: &'a dyn Kernel,
        transfer_function: &'a TransferFunction,
        lights: &'a LightSet,
        options: &RenderOptions,
    ) -> Result<RenderContext<'a>> {
        if !(options.plane_sep.is_finite() && options.plane_sep > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "plane separation must be positive, got {}",
                options.plane_sep
            )));
        }

        if kernel.support() == 0 {
            return Err(RenderError::InvalidParameter(
                "kernel support must be at least 1".into(),
            ));
        }

        if lights.has_view_space() {
            return Err(RenderError::InvalidParameter(
                "view-space lights must be moved to world space first".into(),
            ));
        }

        if let Some(light) = lights.lights().iter().find(|l| !l.is_valid()) {
            return Err(RenderError::InvalidParameter(format!(
                "light direction must be a finite unit vector, got {:?}",
                light.direction
            )));
        }

        let (idx_start, idx_end) = kernel.neighbourhood();

        log::debug!(
            "Render context: volume {:?}, kernel support {}, offsets {idx_start}..={idx_end}, {} lights",
            volume.get_size(),
            kernel.support(),
            lights.len()
        );

        Ok(RenderContext {
            camera,
            volume,
            kernel,
            transfer_function,
            lights,
            plane_sep: options.plane_sep,
            outside_val: options.outside_val,
            num_threads: options.num_threads,
            idx_start,
            idx_end,
        })
    }
}
