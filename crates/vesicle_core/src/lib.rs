//! # Vesicle Core
//!
//! Dense 3D volumes and the voxel-space geometry shared by the ground-truth
//! pipeline.
//!
//! ## Conventions
//!
//! 1. **Axis order**: every index, shape and resolution is `(z, y, x)`
//! 2. **Storage**: volumes are a single contiguous buffer, x fastest
//! 3. **Bounds**: reads outside a volume return `None`, writes are ignored
//!
//! ## Example
//!
//! ```rust
//! use vesicle_core::{Shape, Volume, VoxelCoord};
//!
//! let mut painted: Volume<u16> = Volume::zeros(Shape::new(4, 8, 8));
//! painted.set(VoxelCoord::new(1, 2, 3), 1);
//!
//! assert_eq!(painted.count_painted(), 1);
//! assert_eq!(painted.get(VoxelCoord::new(1, 2, 3)), Some(1));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod geometry;
pub mod label;
pub mod roi;
pub mod shape;
pub mod volume;

pub use error::{VolumeError, VolumeResult};
pub use geometry::{Point3, Resolution};
pub use label::LabelValue;
pub use roi::{Cropped, Roi, VoxelOffset};
pub use shape::{Shape, VoxelCoord};
pub use volume::Volume;
