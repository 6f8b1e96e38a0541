//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use nalgebra::{vector, Point3, Vector3};

use crate::{
    camera::{Camera, CameraParams, Projection},
    color,
    volumetric::{BuildVolume, VolumeGrid, VolumeMetadata},
    TransferFunction,
};

/// Distance of [`axis_camera`] eye from its target.
pub const AXIS_CAMERA_DIST: f32 = 10.0;

/// Cube of `side` samples, all set to `value`, identity transform.
pub fn uniform_volume(side: usize, value: f32) -> VolumeGrid {
    let data = vec![value; side * side * side];
    VolumeGrid::with_identity(vector![side, side, side], data).unwrap()
}

/// Cube of `side` samples with a radial falloff around the centre, values in `[0, 255]`.
pub fn sphere_vol_meta(side: usize) -> VolumeMetadata<u8> {
    let center = (side as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(side * side * side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let d = vector![x as f32, y as f32, z as f32] - Vector3::repeat(center);
                let falloff = (1.0 - d.norm() / center.max(1.0)).max(0.0);
                data.push((falloff * 255.0) as u8);
            }
        }
    }
    VolumeMetadata {
        size: Some(vector![side, side, side]),
        data: Some(data),
        ..Default::default()
    }
}

pub fn sphere_volume(side: usize) -> VolumeGrid {
    BuildVolume::build(sphere_vol_meta(side)).unwrap()
}

/// Opaque red over `[0, 10)`.
pub fn red_tf(unit_step: f32) -> TransferFunction {
    TransferFunction::new(vec![color::new(1.0, 0.0, 0.0, 1.0)], 0.0..10.0, unit_step, 0.99)
        .unwrap()
}

/// Grey ramp over `[0, 256)`, denser values are brighter and more opaque.
pub fn ramp_tf(unit_step: f32) -> TransferFunction {
    TransferFunction::from_fn(64, 0.0..256.0, unit_step, 0.99, |v| {
        let t = v / 256.0;
        color::mono(t, t * 0.5)
    })
    .unwrap()
}

/// Camera looking down the negative z axis at `look_at` from [`AXIS_CAMERA_DIST`] away.
///
/// Image plane is 2 units high and wide, clipping planes 3 units in front of
/// and behind the target.
pub fn axis_camera(
    look_at: Point3<f32>,
    pixel_dims: (usize, usize),
    projection: Projection,
) -> Camera {
    let fov_degrees = (2.0 * (1.0 / AXIS_CAMERA_DIST).atan()).to_degrees();
    Camera::new(CameraParams {
        eye: look_at + vector![0.0, 0.0, AXIS_CAMERA_DIST],
        look_at,
        up: vector![0.0, 1.0, 0.0],
        near: -3.0,
        far: 3.0,
        fov_degrees,
        pixel_dims,
        aspect: 1.0,
        projection,
    })
    .unwrap()
}
