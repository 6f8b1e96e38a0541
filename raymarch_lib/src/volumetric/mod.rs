mod convolution;
mod grid;
mod vol_builder;

pub use convolution::{Convolution, Probe};
pub use grid::VolumeGrid;
pub use vol_builder::{BuildVolume, VolumeMetadata};
