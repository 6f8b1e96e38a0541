use super::Kernel;

/// Linear interpolation kernel, support 2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tent;

impl Kernel for Tent {
    fn support(&self) -> usize {
        2
    }

    fn value(&self, x: f32) -> f32 {
        let x = x.abs();
        if x < 1.0 {
            1.0 - x
        } else {
            0.0
        }
    }

    fn derivative(&self, x: f32) -> f32 {
        if x == 0.0 || x.abs() >= 1.0 {
            0.0
        } else if x < 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

/// Nearest neighbour kernel, support 1.
/// Gradient is always zero, so shading degenerates to ambient term.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxKernel;

impl Kernel for BoxKernel {
    fn support(&self) -> usize {
        1
    }

    fn value(&self, x: f32) -> f32 {
        if x.abs() <= 0.5 {
            1.0
        } else {
            0.0
        }
    }

    fn derivative(&self, _x: f32) -> f32 {
        0.0
    }
}
