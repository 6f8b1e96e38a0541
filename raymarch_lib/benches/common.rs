pub use criterion::{black_box, Criterion};

pub use nalgebra::{point, vector};
pub use raymarch_lib::{
    camera::{Camera, CameraParams, Projection},
    kernel::CubicBSpline,
    light::{white_light, LightParams, LightSet},
    render::{Image, RenderContext, RenderOptions, Renderer},
    test_helpers,
    volumetric::VolumeGrid,
    TransferFunction,
};

pub const RESOLUTION: (usize, usize) = (128, 128);
pub const VOLUME_SIDE: usize = 64;
pub const PLANE_SEP: f32 = 0.5;

/// Everything a benchmark renders, built once outside the measured loop.
pub struct Scene {
    pub camera: Camera,
    pub volume: VolumeGrid,
    pub tf: TransferFunction,
    pub lights: LightSet,
}

impl Scene {
    pub fn new(projection: Projection) -> Scene {
        let center = (VOLUME_SIDE as f32 - 1.0) / 2.0;
        let camera = Camera::new(CameraParams {
            eye: point![center + 40.0, center + 30.0, center + 100.0],
            look_at: point![center, center, center],
            up: vector![0.0, 1.0, 0.0],
            near: -(VOLUME_SIDE as f32),
            far: VOLUME_SIDE as f32,
            fov_degrees: 45.0,
            pixel_dims: RESOLUTION,
            aspect: 1.0,
            projection,
        })
        .unwrap();

        Scene {
            camera,
            volume: test_helpers::sphere_volume(VOLUME_SIDE),
            tf: test_helpers::ramp_tf(1.0),
            lights: LightSet::new(
                vec![white_light(vector![-0.74278, 0.55708, 0.37139]).unwrap()],
                LightParams::default(),
            ),
        }
    }

    pub fn render(&self, num_threads: usize, image: &mut Image) {
        let options = RenderOptions::builder()
            .plane_sep(PLANE_SEP)
            .num_threads(num_threads)
            .build_unchecked();
        let ctx = RenderContext::new(
            &self.camera,
            &self.volume,
            &CubicBSpline,
            &self.tf,
            &self.lights,
            &options,
        )
        .unwrap();
        Renderer::new(ctx).render_into(image).unwrap();
    }
}
