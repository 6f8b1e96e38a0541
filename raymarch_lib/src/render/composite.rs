use nalgebra::Vector3;

use crate::color::{self, RGBA};

/// Front-to-back "over" accumulation of one ray.
///
/// `result` holds non-premultiplied colour and accumulated opacity.
#[derive(Debug, Clone)]
pub struct Composite {
    result: RGBA,
    previous: Option<RGBA>,
    /// Product of `1 - opacity` over all blended samples
    transparency: f32,
    saturated: bool,
}

impl Composite {
    /// Start accumulation, `outside_val` is the result until a sample is blended in.
    pub fn new(outside_val: RGBA) -> Composite {
        Composite {
            result: outside_val,
            previous: None,
            transparency: 1.0,
            saturated: false,
        }
    }

    /// Blend sample behind everything accumulated so far.
    ///
    /// Returns `false` once accumulated opacity exceeds `alpha_near_one`,
    /// after which further samples are ignored. The first contributing sample
    /// only seeds the composite and never stops the ray.
    pub fn blend(&mut self, current: RGBA, alpha_near_one: f32) -> bool {
        if self.saturated {
            return false;
        }

        let transparency_curr = 1.0 - current.w;

        let prev = match self.previous {
            None => {
                self.result = current;
                self.transparency = transparency_curr;
                self.previous = Some(current);
                return true;
            }
            Some(prev) => prev,
        };

        let rgb_premultiplied: Vector3<f32> = prev.xyz() * prev.w;
        let rgb_curr = current.xyz() * (self.transparency * current.w);
        let rgb_composite = rgb_premultiplied + rgb_curr;

        self.transparency *= transparency_curr;
        let opacity = 1.0 - self.transparency;

        self.result = if opacity == 0.0 {
            color::zero()
        } else {
            let rgb = rgb_composite / opacity;
            color::new(rgb.x, rgb.y, rgb.z, opacity)
        };
        self.previous = Some(self.result);

        if opacity > alpha_near_one {
            self.transparency = 0.0;
            self.saturated = true;
            return false;
        }
        true
    }

    pub fn result(&self) -> RGBA {
        self.result
    }

    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    /// Opacity exceeded the termination threshold.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }
}
