use nalgebra::{vector, Vector3};
use nom::{
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    number::complete::float,
    sequence::tuple,
    IResult,
};

use crate::error::{RenderError, Result};

use super::Light;

/// Parse light records, one per line:
/// ```text
/// # r g b      x y z       view-space
/// 1 1 1  0.0 0.0 -1.0  0
/// ```
/// Lines starting with `#` and blank lines are skipped.
/// Directions are normalized, flag `1` marks them as view-space.
pub fn parse_lights(text: &str) -> Result<Vec<Light>> {
    let mut lights = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = |reason: &str| RenderError::MalformedLightRecord {
            line: line_no + 1,
            reason: reason.into(),
        };

        let (_, (color, direction, flag)) = all_consuming(light_record)(line)
            .map_err(|_| malformed("expected `r g b  x y z  flag`"))?;

        if !(color.iter().all(|c| c.is_finite()) && direction.iter().all(|c| c.is_finite())) {
            return Err(malformed("non-finite component"));
        }

        let view_space = match flag {
            0 => false,
            1 => true,
            _ => return Err(malformed("flag must be 0 (world) or 1 (view)")),
        };

        let direction = direction
            .try_normalize(f32::EPSILON)
            .ok_or_else(|| malformed("zero-length direction"))?;

        lights.push(Light {
            color,
            direction,
            view_space,
        });
    }

    Ok(lights)
}

fn triple(s: &str) -> IResult<&str, Vector3<f32>> {
    let (s, (x, _, y, _, z)) = tuple((float, space1, float, space1, float))(s)?;
    Ok((s, vector![x, y, z]))
}

fn light_record(s: &str) -> IResult<&str, (Vector3<f32>, Vector3<f32>, u8)> {
    let (s, (color, _, direction, _, flag, _)) = tuple((
        triple,
        space1,
        triple,
        space1,
        map_res(digit1, |d: &str| d.parse::<u8>()),
        space0,
    ))(s)?;
    Ok((s, (color, direction, flag)))
}
