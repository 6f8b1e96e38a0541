use super::Kernel;

/// Uniform cubic B-spline.
/// Smooth (C2) and non-interpolating, support of 4 samples.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubicBSpline;

impl Kernel for CubicBSpline {
    fn support(&self) -> usize {
        4
    }

    fn value(&self, x: f32) -> f32 {
        let x = x.abs();
        if x < 1.0 {
            2.0 / 3.0 + x * x * (-1.0 + x / 2.0)
        } else if x < 2.0 {
            let t = x - 1.0;
            1.0 / 6.0 + t * (-1.0 / 2.0 + t * (1.0 / 2.0 - t / 6.0))
        } else {
            0.0
        }
    }

    fn derivative(&self, x: f32) -> f32 {
        let ax = x.abs();
        let d = if ax < 1.0 {
            ax * (-2.0 + ax * (3.0 / 2.0))
        } else if ax < 2.0 {
            let t = ax - 1.0;
            -1.0 / 2.0 + t * (1.0 - t / 2.0)
        } else {
            0.0
        };

        if x < 0.0 {
            -d
        } else {
            d
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn known_values() {
        let k = CubicBSpline;
        assert!(close(k.value(0.0), 2.0 / 3.0));
        assert!(close(k.value(1.0), 1.0 / 6.0));
        assert!(close(k.value(-1.0), 1.0 / 6.0));
        assert_eq!(k.value(2.0), 0.0);
        assert_eq!(k.value(-2.5), 0.0);
    }

    #[test]
    fn known_derivatives() {
        let k = CubicBSpline;
        assert_eq!(k.derivative(0.0), 0.0);
        assert!(close(k.derivative(1.0), -0.5));
        assert!(close(k.derivative(-1.0), 0.5));
        assert_eq!(k.derivative(2.0), 0.0);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let k = CubicBSpline;
        let h = 1e-3;
        for &x in &[-1.6, -0.7, -0.1, 0.3, 0.9, 1.4] {
            let fd = (k.value(x + h) - k.value(x - h)) / (2.0 * h);
            assert!((fd - k.derivative(x)).abs() < 1e-3, "x = {x}");
        }
    }

    #[test]
    fn continuous_at_knots() {
        let k = CubicBSpline;
        let eps = 1e-4;
        for knot in [1.0f32, 2.0] {
            assert!((k.value(knot - eps) - k.value(knot + eps)).abs() < 1e-3);
            assert!((k.derivative(knot - eps) - k.derivative(knot + eps)).abs() < 1e-3);
        }
    }
}
