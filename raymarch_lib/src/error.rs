//! Error types of the renderer.
//!
//! Apart from worker spawning, every error is raised while building the render inputs,
//! before any pixel is marched.
//! Samples falling outside the volume are not errors, see [`crate::volumetric::Convolution`].

use thiserror::Error;

/// Error raised while constructing render inputs.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Up vector is parallel to the viewing direction.
    #[error("camera basis is degenerate: up vector is parallel to the view direction")]
    DegenerateCameraBasis,

    /// Index-to-world matrix of a volume cannot be inverted.
    #[error("index-to-world transform of the volume is singular")]
    SingularVolumeTransform,

    /// Light record could not be parsed.
    #[error("malformed light record on line {line}: {reason}")]
    MalformedLightRecord { line: usize, reason: String },

    /// Transfer function without entries.
    #[error("transfer function has no entries")]
    EmptyTransferFunction,

    /// Number of samples does not match volume dimensions.
    #[error("data size mismatch: expected {expected} samples, got {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// Domain of a transfer function is empty or not finite.
    #[error("invalid value domain [{low}, {high})")]
    InvalidDomain { low: f32, high: f32 },

    /// Render parameter out of its valid range.
    #[error("invalid render parameter: {0}")]
    InvalidParameter(String),

    /// Worker thread could not be started.
    #[error("failed to spawn render worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    /// Configuration could not be deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
