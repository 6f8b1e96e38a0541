use nalgebra::{vector, Point3, Vector3};

use crate::{kernel::Kernel, render::RenderContext};

use super::VolumeGrid;

/// Reconstructed field at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub value: f32,
    /// World-space gradient
    pub gradient: Vector3<f32>,
}

/// Resampler evaluating the field and its gradient by separable convolution.
///
/// Holds per-axis kernel weight caches, so one instance is owned by each worker
/// and reused for every sample it takes.
pub struct Convolution {
    offsets: Vec<f32>,
    weights: [Vec<f32>; 3],
    derivatives: [Vec<f32>; 3],
}

impl Convolution {
    pub fn new(kernel: &dyn Kernel) -> Convolution {
        let support = kernel.support();
        Convolution {
            offsets: vec![0.0; support],
            weights: [vec![0.0; support], vec![0.0; support], vec![0.0; support]],
            derivatives: [vec![0.0; support], vec![0.0; support], vec![0.0; support]],
        }
    }

    /// Evaluate field at world position using the volume and kernel of `ctx`.
    ///
    /// Returns `None` if any sample of the neighbourhood lies outside the volume.
    pub fn evaluate(&mut self, pos_world: &Point3<f32>, ctx: &RenderContext) -> Option<Probe> {
        self.evaluate_in(
            pos_world,
            ctx.volume,
            ctx.kernel,
            (ctx.idx_start, ctx.idx_end),
        )
    }

    /// Evaluate field at world position.
    /// `bounds` is the inclusive range of neighbour offsets, see [`Kernel::neighbourhood`].
    pub fn evaluate_in(
        &mut self,
        pos_world: &Point3<f32>,
        volume: &VolumeGrid,
        kernel: &dyn Kernel,
        bounds: (i32, i32),
    ) -> Option<Probe> {
        let (start, end) = bounds;
        let width = (end - start + 1) as usize;
        self.ensure_width(width);

        let pos_index = volume.to_index(pos_world);
        let size = volume.get_size();

        // Fill weight caches, bail out as soon as one axis leaves the grid
        let mut base = [0usize; 3];
        for axis in 0..3 {
            let index = pos_index[axis];
            let nearest = kernel.base_index(index);
            let lowest = nearest + start as f32;
            let highest = nearest + end as f32;

            // negated so NaN positions are rejected too
            if !(lowest >= 0.0 && highest < size[axis] as f32) {
                return None;
            }
            base[axis] = lowest as usize;

            let alpha = index - nearest;
            for (slot, i) in self.offsets.iter_mut().zip(start..=end) {
                *slot = alpha - i as f32;
            }
            kernel.apply_all(&self.offsets, &mut self.weights[axis]);
            kernel.apply_derivative_all(&self.offsets, &mut self.derivatives[axis]);
        }

        let [wx, wy, wz] = &self.weights;
        let [dx, dy, dz] = &self.derivatives;

        let mut value = 0.0;
        let mut grad_index = vector![0.0, 0.0, 0.0];

        for k in 0..width {
            let z = base[2] + k;
            for j in 0..width {
                let y = base[1] + j;
                let w_yz = wy[j] * wz[k];
                for i in 0..width {
                    let x = base[0] + i;
                    let sample = volume.get_unchecked_pos(x, y, z);

                    value += sample * wx[i] * w_yz;
                    grad_index.x += sample * dx[i] * w_yz;
                    grad_index.y += sample * wx[i] * dy[j] * wz[k];
                    grad_index.z += sample * wx[i] * wy[j] * dz[k];
                }
            }
        }

        Some(Probe {
            value,
            gradient: volume.gradient_to_world() * grad_index,
        })
    }

    fn ensure_width(&mut self, width: usize) {
        if self.offsets.len() != width {
            self.offsets.resize(width, 0.0);
            for cache in self.weights.iter_mut().chain(self.derivatives.iter_mut()) {
                cache.resize(width, 0.0);
            }
        }
    }
}
