//! # Sphere Rasterization
//!
//! A vesicle is round in physical space. With anisotropic voxels it is an
//! ellipsoid in voxel space, with per-axis radius
//! `r_axis = diameter / (2 * resolution_axis)`.
//!
//! A voxel at integer position `v` belongs to the sphere around the
//! real-valued center `c` iff
//!
//! ```text
//! ((v.z - c.z) / r.z)^2 + ((v.y - c.y) / r.y)^2 + ((v.x - c.x) / r.x)^2 <= 1
//! ```
//!
//! Only the bounding box `[c - r, c + r]` is scanned, clipped to the volume.
//! Spheres that cross an edge are drawn partially; that is not an error.
//!
//! ## Parallelism
//!
//! Footprints of different centroids are independent. With more than one
//! worker, centroids are split into contiguous batches on scoped threads and
//! each footprint is sent to the owning thread, which does every write. The
//! output is identical to the single-threaded pass.

use vesicle_core::{Point3, Resolution, Shape, Volume, VoxelCoord};

use crate::centroid::Centroid;
use crate::config::{validate_diameter, validate_resolution};
use crate::error::ConfigError;

/// Inclusive voxel box, already clipped to a volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelBox {
    /// Lower corner.
    pub min: VoxelCoord,
    /// Upper corner.
    pub max: VoxelCoord,
    /// True if clipping removed part of the unclipped box.
    pub clipped: bool,
}

impl VoxelBox {
    /// Number of voxels in the box, at least one.
    #[inline]
    #[must_use]
    pub const fn voxel_count(&self) -> usize {
        (self.max.z - self.min.z + 1)
            * (self.max.y - self.min.y + 1)
            * (self.max.x - self.min.x + 1)
    }
}

/// Voxels covered by one sphere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SphereFootprint {
    /// Flat indices of member voxels, ascending.
    pub indices: Vec<usize>,
    /// True if part of the sphere fell outside the volume.
    pub clipped: bool,
}

/// Totals for drawing a batch of spheres into one volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterSummary {
    /// Spheres drawn.
    pub spheres: usize,
    /// Spheres cut by the volume edge.
    pub clipped_spheres: usize,
    /// Spheres with no voxel inside the volume.
    pub empty_spheres: usize,
    /// Voxels that changed from unclaimed to the label.
    pub voxels_written: usize,
}

impl RasterSummary {
    fn record(&mut self, footprint: &SphereFootprint, newly_written: usize) {
        self.spheres += 1;
        self.voxels_written += newly_written;
        if footprint.clipped {
            self.clipped_spheres += 1;
        }
        if footprint.indices.is_empty() {
            self.empty_spheres += 1;
        }
    }
}

/// Draws anisotropic spheres of one physical diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereRasterizer {
    /// Per-axis voxel radii `[z, y, x]`.
    radii: [f64; 3],
}

impl SphereRasterizer {
    /// Creates a rasterizer from a physical diameter and voxel resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDiameter`] or
    /// [`ConfigError::InvalidResolution`] for non-positive values.
    pub fn new(diameter: f64, resolution: Resolution) -> Result<Self, ConfigError> {
        validate_diameter(diameter)?;
        validate_resolution(resolution)?;

        let [rz, ry, rx] = resolution.as_array();
        Ok(Self {
            radii: [
                diameter / (2.0 * rz),
                diameter / (2.0 * ry),
                diameter / (2.0 * rx),
            ],
        })
    }

    /// Per-axis radii in voxels, `[z, y, x]`.
    #[inline]
    #[must_use]
    pub const fn radii(&self) -> [f64; 3] {
        self.radii
    }

    /// Membership test for one voxel.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, center: Point3, voxel: VoxelCoord) -> bool {
        let mut sum = 0.0;
        for ((v, c), r) in voxel
            .as_array()
            .into_iter()
            .zip(center.as_array())
            .zip(self.radii)
        {
            let d = (v as f64 - c) / r;
            sum += d * d;
        }
        sum <= 1.0
    }

    /// Bounding box of the sphere clipped to `shape`.
    ///
    /// Returns `None` if the sphere holds no voxel inside the volume.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bounding_box(&self, center: Point3, shape: Shape) -> Option<VoxelBox> {
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut clipped = false;

        for axis in 0..3 {
            let size = shape.as_array()[axis];
            if size == 0 {
                return None;
            }
            let c = center.as_array()[axis];
            let r = self.radii[axis];

            let first = (c - r).ceil();
            let last = (c + r).floor();
            if last < first {
                // No integer position along this axis is within reach.
                return None;
            }
            if first < 0.0 || last > (size - 1) as f64 {
                clipped = true;
            }

            let first = first.max(0.0);
            let last = last.min((size - 1) as f64);
            if last < first {
                return None;
            }
            lo[axis] = first as usize;
            hi[axis] = last as usize;
        }

        Some(VoxelBox {
            min: VoxelCoord::new(lo[0], lo[1], lo[2]),
            max: VoxelCoord::new(hi[0], hi[1], hi[2]),
            clipped,
        })
    }

    /// Flat indices of every member voxel inside `shape`.
    #[must_use]
    pub fn footprint(&self, center: Point3, shape: Shape) -> SphereFootprint {
        let Some(bounds) = self.bounding_box(center, shape) else {
            tracing::warn!(
                "sphere at {:?} lies entirely outside volume {}",
                center.as_array(),
                shape
            );
            return SphereFootprint {
                indices: Vec::new(),
                clipped: true,
            };
        };

        if bounds.clipped {
            tracing::trace!("sphere at {:?} clipped to {:?}", center.as_array(), bounds);
        }

        let mut indices = Vec::with_capacity(bounds.voxel_count());
        for z in bounds.min.z..=bounds.max.z {
            for y in bounds.min.y..=bounds.max.y {
                for x in bounds.min.x..=bounds.max.x {
                    let voxel = VoxelCoord::new(z, y, x);
                    if self.contains(center, voxel) {
                        indices.push(shape.index_unchecked(voxel));
                    }
                }
            }
        }

        SphereFootprint {
            indices,
            clipped: bounds.clipped,
        }
    }

    /// Writes `label` into every member voxel of one sphere.
    ///
    /// Returns the footprint and how many voxels were unclaimed (0) before.
    pub fn rasterize(
        &self,
        center: Point3,
        label: u32,
        volume: &mut Volume<u32>,
    ) -> (SphereFootprint, usize) {
        let footprint = self.footprint(center, volume.shape());
        let written = apply(&footprint, label, volume);
        (footprint, written)
    }

    /// Draws one sphere per centroid into `volume`, using up to `workers`
    /// threads.
    pub fn rasterize_all(
        &self,
        centroids: &[Centroid],
        label: u32,
        volume: &mut Volume<u32>,
        workers: usize,
    ) -> RasterSummary {
        let mut summary = RasterSummary::default();
        let shape = volume.shape();

        if workers <= 1 || centroids.len() < 2 {
            for centroid in centroids {
                let (footprint, written) = self.rasterize(centroid.position, label, volume);
                summary.record(&footprint, written);
            }
            return summary;
        }

        let batch_len = centroids.len().div_ceil(workers);
        let (tx, rx) = crossbeam_channel::unbounded::<SphereFootprint>();

        std::thread::scope(|scope| {
            for batch in centroids.chunks(batch_len) {
                let tx = tx.clone();
                scope.spawn(move || {
                    for centroid in batch {
                        if tx.send(self.footprint(centroid.position, shape)).is_err() {
                            return;
                        }
                    }
                });
            }
            drop(tx);

            for footprint in &rx {
                let written = apply(&footprint, label, volume);
                summary.record(&footprint, written);
            }
        });

        summary
    }
}

/// Writes `label` into the footprint, returning how many voxels were 0.
fn apply(footprint: &SphereFootprint, label: u32, volume: &mut Volume<u32>) -> usize {
    let data = volume.as_mut_slice();
    let mut written = 0;
    for &index in &footprint.indices {
        if data[index] == 0 {
            written += 1;
        }
        data[index] = label;
    }
    written
}
