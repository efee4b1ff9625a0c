//! # Ground Truth Error Types
//!
//! All errors that can occur while generating a ground-truth volume.
//! Empty marker layers, spheres clipped away entirely and centroids that
//! collapse under the separation rule are outcomes, not errors.

use thiserror::Error;
use vesicle_core::{Shape, VolumeError};

use crate::class::MarkerClass;

/// Invalid generator configuration. Reported before any work is done.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Diameter must be a positive, finite physical length.
    #[error("diameter must be positive, got {0}")]
    InvalidDiameter(f64),

    /// Every resolution component must be a positive, finite length.
    #[error("resolution along {axis} must be positive, got {value}")]
    InvalidResolution {
        /// Axis name (`z`, `y` or `x`).
        axis: char,
        /// The offending spacing.
        value: f64,
    },

    /// Minimum distance is a voxel count and cannot be negative.
    #[error("min_distance must not be negative, got {0}")]
    NegativeMinDistance(i64),

    /// Minimum distance does not fit the voxel grid arithmetic.
    #[error("min_distance {0} is too large")]
    MinDistanceTooLarge(i64),

    /// Class ids must be nonzero, distinct, and differ from the background.
    #[error("invalid labels: {0}")]
    InvalidLabels(String),

    /// Configuration text is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {message}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
}

/// Errors that can occur while computing a ground-truth volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroundTruthError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A marker volume does not match the raw image.
    #[error("{class} volume has shape {found}, expected {expected}")]
    ShapeMismatch {
        /// Which marker layer is wrong.
        class: MarkerClass,
        /// Shape of the raw image.
        expected: Shape,
        /// Shape of the marker layer.
        found: Shape,
    },

    /// A volume could not be built or sliced.
    #[error(transparent)]
    Volume(#[from] VolumeError),
}

/// Result type for ground-truth operations.
pub type GroundTruthResult<T> = Result<T, GroundTruthError>;
