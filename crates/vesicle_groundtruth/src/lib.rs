//! # Vesicle Ground Truth
//!
//! Turns sparse, hand-painted marker blobs into a dense label volume of
//! spheres, one per marker, sized from a physical diameter.
//!
//! ## Pipeline
//!
//! 1. **Extraction**: each 26-connected painted blob becomes one centroid
//! 2. **Separation**: centroids closer than `2 * min_distance + 1` voxels
//!    to an earlier accepted centroid are dropped
//! 3. **Rasterization**: one ellipsoid (a sphere in physical space) per
//!    accepted centroid, clipped to the volume
//! 4. **Compositing**: `pos` and `neg` volumes merged with a fixed
//!    precedence into the final ground truth
//!
//! Every stage is a pure function; nothing is retained between runs.
//!
//! ## Example
//!
//! ```rust
//! use vesicle_core::{Resolution, Shape, Volume, VoxelCoord};
//! use vesicle_groundtruth::{GroundTruthConfig, GroundTruthGenerator, PerClass};
//!
//! let shape = Shape::new(20, 20, 20);
//! let mut pos: Volume<u16> = Volume::zeros(shape);
//! let neg: Volume<u16> = Volume::zeros(shape);
//! pos.set(VoxelCoord::new(10, 10, 10), 1);
//!
//! let config = GroundTruthConfig {
//!     diameter: 100.0,
//!     resolution: Resolution::isotropic(10.0),
//!     ..GroundTruthConfig::default()
//! };
//! let generator = GroundTruthGenerator::new(config)?;
//! let gt = generator.compute(shape, &PerClass::new(&pos, &neg))?;
//!
//! assert_eq!(gt.volume.get(VoxelCoord::new(15, 10, 10)), Some(1));
//! assert_eq!(gt.volume.get(VoxelCoord::new(16, 10, 10)), Some(0));
//! # Ok::<(), vesicle_groundtruth::GroundTruthError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod centroid;
pub mod class;
pub mod composite;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod separation;
pub mod sphere;

pub use centroid::{extract_centroids, label_blobs, Blob, BlobLabeling, Centroid};
pub use class::{MarkerClass, PerClass};
pub use composite::{CompositeStats, VolumeCompositor};
pub use config::{ClassLabels, GroundTruthConfig, Precedence, SeparationScope};
pub use error::{ConfigError, GroundTruthError, GroundTruthResult};
pub use pipeline::{GroundTruth, GroundTruthGenerator, PaintedLabels};
pub use report::{ClassReport, GroundTruthReport};
pub use separation::{SeparationEnforcer, SeparationOutcome};
pub use sphere::{RasterSummary, SphereFootprint, SphereRasterizer, VoxelBox};
