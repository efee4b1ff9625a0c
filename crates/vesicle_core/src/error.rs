//! # Volume Error Types
//!
//! Errors raised while constructing or slicing volumes.

use thiserror::Error;

use crate::shape::Shape;

/// Errors that can occur when building or cropping a volume.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// The backing buffer does not hold exactly one value per voxel.
    #[error("buffer holds {actual} values but shape {shape} needs {expected}")]
    LengthMismatch {
        /// Shape the buffer was supposed to fill.
        shape: Shape,
        /// Number of voxels in that shape.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A region of interest has zero extent along some axis.
    #[error("region of interest is empty along the {axis} axis")]
    EmptyRoi {
        /// Axis name (`z`, `y` or `x`).
        axis: char,
    },

    /// A region of interest reaches past the end of the parent volume.
    #[error("region of interest ends at {end} on the {axis} axis but the volume is {size} long")]
    RoiOutOfBounds {
        /// Axis name (`z`, `y` or `x`).
        axis: char,
        /// Exclusive end requested.
        end: usize,
        /// Parent extent along that axis.
        size: usize,
    },
}

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;
