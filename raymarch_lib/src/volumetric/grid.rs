use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::{
    common::ValueRange,
    error::{RenderError, Result},
};

/// Dense grid of scalar samples placed in world space by an affine transform.
///
/// Samples are stored x-fastest: sample `(x, y, z)` lives at
/// `x + y * size.x + z * size.x * size.y`.
pub struct VolumeGrid {
    size: Vector3<usize>,
    data: Vec<f32>,
    index_to_world: Matrix4<f32>,
    world_to_index: Matrix4<f32>,
    // inverse-transpose of the linear part, gradients are covectors
    gradient_to_world: Matrix3<f32>,
}

impl std::fmt::Debug for VolumeGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeGrid")
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .field("index_to_world", &self.index_to_world)
            .finish()
    }
}

impl VolumeGrid {
    /// Construct grid from samples and full index-to-world matrix.
    ///
    /// Fails if the number of samples does not match `size` or the
    /// transform cannot be inverted.
    pub fn new(
        size: Vector3<usize>,
        data: Vec<f32>,
        index_to_world: Matrix4<f32>,
    ) -> Result<VolumeGrid> {
        let expected = size.x * size.y * size.z;
        if data.len() != expected {
            return Err(RenderError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let world_to_index = index_to_world
            .try_inverse()
            .ok_or(RenderError::SingularVolumeTransform)?;

        let linear: Matrix3<f32> = index_to_world.fixed_slice::<3, 3>(0, 0).into_owned();
        let gradient_to_world = linear
            .try_inverse()
            .ok_or(RenderError::SingularVolumeTransform)?
            .transpose();

        Ok(VolumeGrid {
            size,
            data,
            index_to_world,
            world_to_index,
            gradient_to_world,
        })
    }

    /// Construct grid from per-axis space directions and the world position of sample `(0, 0, 0)`.
    ///
    /// Column `i` of `space_directions` is the world-space step between neighbouring samples along axis `i`.
    pub fn from_space(
        size: Vector3<usize>,
        data: Vec<f32>,
        space_directions: Matrix3<f32>,
        space_origin: Point3<f32>,
    ) -> Result<VolumeGrid> {
        let mut index_to_world = space_directions.to_homogeneous();
        index_to_world
            .fixed_slice_mut::<3, 1>(0, 3)
            .copy_from(&space_origin.coords);
        VolumeGrid::new(size, data, index_to_world)
    }

    /// Grid with identity index-to-world transform.
    pub fn with_identity(size: Vector3<usize>, data: Vec<f32>) -> Result<VolumeGrid> {
        VolumeGrid::new(size, data, Matrix4::identity())
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    /// Sample at integer position, `None` outside of the grid.
    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    /// Sample at integer position.
    /// Caller guarantees the position is inside the grid.
    #[inline]
    pub(crate) fn get_unchecked_pos(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.get_3d_index(x, y, z)]
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn index_to_world(&self) -> &Matrix4<f32> {
        &self.index_to_world
    }

    pub fn world_to_index(&self) -> &Matrix4<f32> {
        &self.world_to_index
    }

    /// Transports index-space gradients into world space.
    pub fn gradient_to_world(&self) -> &Matrix3<f32> {
        &self.gradient_to_world
    }

    /// Smallest and largest stored sample.
    pub fn value_range(&self) -> ValueRange {
        ValueRange::from_samples(self.data.iter().copied())
    }

    pub fn to_index(&self, world: &Point3<f32>) -> Point3<f32> {
        self.world_to_index.transform_point(world)
    }

    pub fn to_world(&self, index: &Point3<f32>) -> Point3<f32> {
        self.index_to_world.transform_point(index)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{matrix, point, vector};

    use super::*;

    fn ramp(size: Vector3<usize>) -> Vec<f32> {
        (0..size.x * size.y * size.z).map(|v| v as f32).collect()
    }

    #[test]
    fn rejects_wrong_data_len() {
        let res = VolumeGrid::with_identity(vector![2, 2, 2], vec![0.0; 7]);
        assert!(matches!(
            res,
            Err(RenderError::DataSizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn rejects_singular_transform() {
        let directions = matrix![1.0, 0.0, 0.0;
                                 0.0, 1.0, 0.0;
                                 0.0, 0.0, 0.0];
        let res = VolumeGrid::from_space(
            vector![2, 2, 2],
            vec![0.0; 8],
            directions,
            point![0.0, 0.0, 0.0],
        );
        assert!(matches!(res, Err(RenderError::SingularVolumeTransform)));
    }

    #[test]
    fn x_fastest_layout() {
        let size = vector![2, 3, 4];
        let grid = VolumeGrid::with_identity(size, ramp(size)).unwrap();

        assert_eq!(grid.get_data(0, 0, 0), Some(0.0));
        assert_eq!(grid.get_data(1, 0, 0), Some(1.0));
        assert_eq!(grid.get_data(0, 1, 0), Some(2.0));
        assert_eq!(grid.get_data(0, 0, 1), Some(6.0));
        assert_eq!(grid.get_data(1, 2, 3), Some(23.0));
        assert_eq!(grid.get_data(2, 0, 0), None);
        assert_eq!(grid.get_data(0, 0, 4), None);
    }

    #[test]
    fn space_transform_roundtrip() {
        let directions = matrix![2.0, 0.0, 0.0;
                                 0.0, 0.5, 0.0;
                                 0.0, 0.0, 1.0];
        let grid = VolumeGrid::from_space(
            vector![2, 2, 2],
            vec![0.0; 8],
            directions,
            point![10.0, -4.0, 1.0],
        )
        .unwrap();

        let world = grid.to_world(&point![1.0, 2.0, 3.0]);
        assert_eq!(world, point![12.0, -3.0, 4.0]);

        let index = grid.to_index(&world);
        assert!((index - point![1.0, 2.0, 3.0]).norm() < 1e-5);
    }

    #[test]
    fn gradient_transform_is_inverse_transpose() {
        // sheared grid, direction of axis 1 leans into x
        let directions = matrix![1.0, 1.0, 0.0;
                                 0.0, 1.0, 0.0;
                                 0.0, 0.0, 2.0];
        let grid = VolumeGrid::from_space(
            vector![2, 2, 2],
            vec![0.0; 8],
            directions,
            point![0.0, 0.0, 0.0],
        )
        .unwrap();

        let expected = directions.try_inverse().unwrap().transpose();
        assert!((grid.gradient_to_world() - expected).norm() < 1e-6);

        // gradient of f(world) = world.x, in index space df/di = (1, 1, 0)
        let world_grad = grid.gradient_to_world() * vector![1.0, 1.0, 0.0];
        assert!((world_grad - vector![1.0, 0.0, 0.0]).norm() < 1e-6);
    }

    #[test]
    fn value_range() {
        let size = vector![2, 2, 2];
        let grid = VolumeGrid::with_identity(size, ramp(size)).unwrap();
        let range = grid.value_range();
        assert_eq!(range.low, 0.0);
        assert_eq!(range.high, 7.0);
    }
}
