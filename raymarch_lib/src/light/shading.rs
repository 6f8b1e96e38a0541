use nalgebra::Vector3;

use super::LightSet;

/// Blinn-Phong lighting of a sample.
///
/// `rgb` is the material colour, `gradient` the world-space field gradient and
/// `viewer_dir` the normalized direction towards the viewer. The surface normal is
/// the negated gradient, since density grows towards the inside of an object.
/// Result is not clamped.
pub fn blinn_phong(
    rgb: &Vector3<f32>,
    gradient: &Vector3<f32>,
    viewer_dir: &Vector3<f32>,
    lights: &LightSet,
) -> Vector3<f32> {
    let params = lights.params();
    let ambient = rgb * params.k_ambient;

    if lights.is_empty() || (params.k_ambient == 0.0 && params.k_specular == 0.0) {
        return ambient;
    }

    let grad_len = gradient.norm();
    if grad_len == 0.0 {
        return ambient;
    }

    let normal = -gradient / grad_len;

    let mut out = ambient;
    for light in lights.lights() {
        let n_dot_l = normal.dot(&light.direction).max(0.0);
        out += rgb.component_mul(&light.color) * (params.k_diffuse * n_dot_l);

        // viewer opposite to the light has no halfway vector
        if let Some(halfway) = (viewer_dir + light.direction).try_normalize(0.0) {
            let n_dot_h = normal.dot(&halfway).max(0.0);
            out += light.color * (params.k_specular * n_dot_h.powf(params.shininess));
        }
    }

    out
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::light::{white_light, LightParams};

    fn params(k_ambient: f32, k_diffuse: f32, k_specular: f32) -> LightParams {
        LightParams {
            k_ambient,
            k_diffuse,
            k_specular,
            shininess: 10.0,
            ..Default::default()
        }
    }

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn zero_gradient_is_ambient() {
        let lights = LightSet::new(vec![white_light(vector![0.0, 0.0, 1.0]).unwrap()], params(0.5, 1.0, 1.0));
        let out = blinn_phong(
            &vector![1.0, 0.5, 0.0],
            &vector![0.0, 0.0, 0.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );
        assert_eq!(out, vector![0.5, 0.25, 0.0]);
    }

    #[test]
    fn no_lights_is_ambient() {
        let lights = LightSet::new(vec![], params(0.3, 1.0, 1.0));
        let out = blinn_phong(
            &vector![1.0, 1.0, 1.0],
            &vector![0.0, 0.0, -1.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );
        assert!(close(out, vector![0.3, 0.3, 0.3]));
    }

    #[test]
    fn no_ambient_no_specular_short_circuits() {
        let lights = LightSet::new(vec![white_light(vector![0.0, 0.0, 1.0]).unwrap()], params(0.0, 1.0, 0.0));
        let out = blinn_phong(
            &vector![1.0, 1.0, 1.0],
            &vector![0.0, 0.0, -1.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );
        assert_eq!(out, vector![0.0, 0.0, 0.0]);
    }

    #[test]
    fn head_on_light() {
        // gradient points into the surface, normal faces the light and viewer
        let lights = LightSet::new(vec![white_light(vector![0.0, 0.0, 1.0]).unwrap()], params(0.1, 0.5, 0.25));
        let out = blinn_phong(
            &vector![1.0, 0.0, 0.0],
            &vector![0.0, 0.0, -4.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );
        // ambient 0.1 red, diffuse 0.5 red, specular 0.25 white
        assert!(close(out, vector![0.85, 0.25, 0.25]));
    }

    #[test]
    fn light_behind_surface() {
        let lights = LightSet::new(vec![white_light(vector![0.0, 0.0, -1.0]).unwrap()], params(0.1, 0.5, 0.25));
        let out = blinn_phong(
            &vector![1.0, 0.0, 0.0],
            &vector![0.0, 0.0, -1.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );
        // viewer and light opposite, only ambient remains
        assert!(close(out, vector![0.1, 0.0, 0.0]));
    }

    #[test]
    fn oblique_light() {
        let light_dir = vector![0.0, 1.0, 1.0].normalize();
        let lights = LightSet::new(vec![white_light(light_dir).unwrap()], params(0.0, 1.0, 1.0));
        let out = blinn_phong(
            &vector![0.0, 1.0, 0.0],
            &vector![0.0, 0.0, -1.0],
            &vector![0.0, 0.0, 1.0],
            &lights,
        );

        let n_dot_l = std::f32::consts::FRAC_1_SQRT_2;
        let halfway = (vector![0.0, 0.0, 1.0] + light_dir).normalize();
        let spec = halfway.z.powf(10.0);
        assert!(close(out, vector![spec, n_dot_l + spec, spec]));
    }
}
