use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::{RenderError, Result};

use super::VolumeGrid;

/// Construction of volume from parsed metadata.
pub trait BuildVolume<M>
where
    Self: Sized,
{
    fn build(metadata: M) -> Result<Self>;
}

/// Everything an external loader extracts from a volume file.
///
/// Samples can be of any type convertible into `f32` (`u8`, `u16`, `f32`, ...)
/// and are stored x-fastest.
pub struct VolumeMetadata<T> {
    /// Number of samples along each axis
    pub size: Option<Vector3<usize>>,
    /// Columns are world-space steps between neighbouring samples,
    /// identity if not provided
    pub space_directions: Option<Matrix3<f32>>,
    /// World position of the first sample, origin if not provided
    pub space_origin: Option<Point3<f32>>,
    pub data: Option<Vec<T>>,
}

impl<T> Default for VolumeMetadata<T> {
    fn default() -> Self {
        Self {
            size: None,
            space_directions: None,
            space_origin: None,
            data: None,
        }
    }
}

impl<T> BuildVolume<VolumeMetadata<T>> for VolumeGrid
where
    T: Into<f32> + Copy,
{
    fn build(metadata: VolumeMetadata<T>) -> Result<VolumeGrid> {
        let size = metadata
            .size
            .ok_or_else(|| RenderError::InvalidParameter("volume size missing".into()))?;
        let data = metadata
            .data
            .ok_or_else(|| RenderError::InvalidParameter("volume samples missing".into()))?;

        let data: Vec<f32> = data.iter().map(|&v| v.into()).collect();

        let space_directions = metadata.space_directions.unwrap_or_else(Matrix3::identity);
        let space_origin = metadata.space_origin.unwrap_or_else(Point3::origin);

        let grid = VolumeGrid::from_space(size, data, space_directions, space_origin)?;

        log::debug!("New volume grid, size {size:?}, origin {space_origin:?}");

        Ok(grid)
    }
}
