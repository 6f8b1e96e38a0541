//! Separable 1-D reconstruction kernels.
//!
//! A kernel is evaluated once per axis and the 3-D filter is the product of the
//! three 1-D weights. Besides the value, every kernel provides its analytic
//! derivative, which the resampler uses to compute gradients.

mod cubic_bspline;
mod simple;

pub use cubic_bspline::CubicBSpline;
pub use simple::{BoxKernel, Tent};

/// Reconstruction filter.
///
/// `value` must be even and `derivative` odd.
pub trait Kernel: Send + Sync {
    /// Width of the neighbourhood, in samples, the kernel is non-zero over.
    fn support(&self) -> usize;

    fn value(&self, x: f32) -> f32;

    fn derivative(&self, x: f32) -> f32;

    /// Evaluate kernel at every offset, writing into `out`.
    /// `out` must be at least as long as `offsets`.
    fn apply_all(&self, offsets: &[f32], out: &mut [f32]) {
        for (o, &x) in out.iter_mut().zip(offsets) {
            *o = self.value(x);
        }
    }

    /// Evaluate derivative at every offset, writing into `out`.
    fn apply_derivative_all(&self, offsets: &[f32], out: &mut [f32]) {
        for (o, &x) in out.iter_mut().zip(offsets) {
            *o = self.derivative(x);
        }
    }

    /// Inclusive range of neighbour offsets covered by the kernel,
    /// relative to the base sample chosen by [`Kernel::base_index`].
    fn neighbourhood(&self) -> (i32, i32) {
        let support = self.support() as i32;
        if support & 1 == 1 {
            ((1 - support) / 2, (support - 1) / 2)
        } else {
            (1 - support / 2, support / 2)
        }
    }

    /// Base sample for continuous index `index`.
    ///
    /// Even kernels start from the sample at or below the position,
    /// odd kernels from the nearest one.
    fn base_index(&self, index: f32) -> f32 {
        if self.support() & 1 == 1 {
            (index + 0.5).floor()
        } else {
            index.floor()
        }
    }
}

#[cfg(test)]
mod test {

    use proptest::prelude::*;

    use super::*;

    fn kernels() -> Vec<Box<dyn Kernel>> {
        vec![Box::new(CubicBSpline), Box::new(Tent), Box::new(BoxKernel)]
    }

    /// Sum of weights over the whole neighbourhood at fractional offset `alpha`.
    fn weight_sum(kernel: &dyn Kernel, alpha: f32) -> f32 {
        let (start, end) = kernel.neighbourhood();
        (start..=end).map(|i| kernel.value(alpha - i as f32)).sum()
    }

    #[test]
    fn neighbourhood_bounds() {
        assert_eq!(CubicBSpline.neighbourhood(), (-1, 2));
        assert_eq!(Tent.neighbourhood(), (0, 1));
        assert_eq!(BoxKernel.neighbourhood(), (0, 0));
    }

    #[test]
    fn base_index_parity() {
        assert_eq!(CubicBSpline.base_index(2.7), 2.0);
        assert_eq!(BoxKernel.base_index(2.7), 3.0);
        assert_eq!(BoxKernel.base_index(2.3), 2.0);
        assert_eq!(Tent.base_index(-0.3), -1.0);
    }

    #[test]
    fn apply_all_matches_scalar() {
        let offsets = [-1.7, -0.2, 0.0, 0.4, 1.9];
        let mut values = [0.0; 5];
        let mut derivs = [0.0; 5];
        CubicBSpline.apply_all(&offsets, &mut values);
        CubicBSpline.apply_derivative_all(&offsets, &mut derivs);

        for i in 0..offsets.len() {
            assert_eq!(values[i], CubicBSpline.value(offsets[i]));
            assert_eq!(derivs[i], CubicBSpline.derivative(offsets[i]));
        }
    }

    proptest! {
        #[test]
        fn kernels_are_symmetric(x in -3.0f32..3.0) {
            for kernel in kernels() {
                prop_assert_eq!(kernel.value(x), kernel.value(-x));
                prop_assert_eq!(kernel.derivative(-x), -kernel.derivative(x));
            }
        }

        #[test]
        fn partition_of_unity(index in 0.0f32..64.0) {
            for kernel in kernels() {
                let alpha = index - kernel.base_index(index);
                let sum = weight_sum(kernel.as_ref(), alpha);
                prop_assert!((sum - 1.0).abs() < 1e-5, "sum {} at alpha {}", sum, alpha);
            }
        }

        #[test]
        fn derivative_weights_cancel(alpha in 0.0f32..1.0) {
            let kernel = CubicBSpline;
            let (start, end) = kernel.neighbourhood();
            let sum: f32 = (start..=end).map(|i| kernel.derivative(alpha - i as f32)).sum();
            prop_assert!(sum.abs() < 1e-5);
        }
    }
}
