use std::ops::{Add, Mul, Sub};

/// Position of `x` inside `[in_min, in_max]`, 0 at `in_min` and 1 at `in_max`.
/// Not clamped.
pub fn unlerp(in_min: f32, x: f32, in_max: f32) -> f32 {
    (x - in_min) / (in_max - in_min)
}

/// Blend between `out_min` and `out_max` by `alpha`.
/// Works for scalars and nalgebra vectors alike, equal endpoints give back `out_min` exactly.
pub fn lerp<T>(out_min: T, out_max: T, alpha: f32) -> T
where
    T: Copy + Mul<f32, Output = T> + Add<Output = T> + Sub<Output = T>,
{
    out_min + (out_max - out_min) * alpha
}

/// Maps `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn lerp_range<T>(out_min: T, out_max: T, in_min: f32, x: f32, in_max: f32) -> T
where
    T: Copy + Mul<f32, Output = T> + Add<Output = T> + Sub<Output = T>,
{
    lerp(out_min, out_max, unlerp(in_min, x, in_max))
}
