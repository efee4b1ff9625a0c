//! # Blob Centroid Extraction
//!
//! A painted marker is a blob: a maximal set of painted voxels connected
//! through faces, edges or corners (26-neighborhood), so a diagonal brush
//! stroke stays one marker. Each blob is reduced to the unweighted mean of
//! its voxel coordinates.
//!
//! ## Algorithm
//!
//! 1. Scan the volume in flat index order
//! 2. At each painted, unlabeled voxel, start a breadth-first fill with an
//!    explicit queue (no recursion, so large blobs cannot overflow the stack)
//! 3. Accumulate coordinate sums and the bounding box while filling
//!
//! Blobs are numbered in the order their first voxel is met by the scan,
//! which makes the centroid sequence deterministic.

use std::collections::VecDeque;

use vesicle_core::{LabelValue, Point3, Shape, Volume, VoxelCoord};

use crate::class::MarkerClass;

/// Offsets of the 26 neighbors of a voxel, in `(dz, dy, dx)`.
const NEIGHBORS_26: [[isize; 3]; 26] = {
    let mut out = [[0isize; 3]; 26];
    let mut n = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if !(dz == 0 && dy == 0 && dx == 0) {
                    out[n] = [dz, dy, dx];
                    n += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
};

/// The representative position of one painted marker blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    /// Which marker layer the blob came from.
    pub class: MarkerClass,
    /// Mean voxel coordinate of the blob.
    pub position: Point3,
    /// Number of voxels in the blob.
    pub voxel_count: usize,
}

/// One connected component of painted voxels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    /// Component id in the label map, starting at 1.
    pub id: u32,
    /// First voxel met by the scan.
    pub seed: VoxelCoord,
    /// Number of voxels.
    pub voxel_count: usize,
    /// Per-axis sums of voxel coordinates, `[z, y, x]`.
    pub coord_sum: [u64; 3],
    /// Inclusive lower corner of the bounding box.
    pub min: VoxelCoord,
    /// Inclusive upper corner of the bounding box.
    pub max: VoxelCoord,
}

impl Blob {
    fn start(id: u32, seed: VoxelCoord) -> Self {
        Self {
            id,
            seed,
            voxel_count: 0,
            coord_sum: [0; 3],
            min: seed,
            max: seed,
        }
    }

    fn add(&mut self, coord: VoxelCoord) {
        self.voxel_count += 1;
        for (sum, c) in self.coord_sum.iter_mut().zip(coord.as_array()) {
            *sum += c as u64;
        }
        self.min = VoxelCoord::new(
            self.min.z.min(coord.z),
            self.min.y.min(coord.y),
            self.min.x.min(coord.x),
        );
        self.max = VoxelCoord::new(
            self.max.z.max(coord.z),
            self.max.y.max(coord.y),
            self.max.x.max(coord.x),
        );
    }

    /// Arithmetic mean of the blob's voxel coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Point3 {
        let n = self.voxel_count as f64;
        Point3::new(
            self.coord_sum[0] as f64 / n,
            self.coord_sum[1] as f64 / n,
            self.coord_sum[2] as f64 / n,
        )
    }
}

/// Result of the connected-component pass.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobLabeling {
    /// Component id per voxel; 0 where nothing is painted.
    pub labels: Volume<u32>,
    /// Components in discovery order; `blobs[i].id == i + 1`.
    pub blobs: Vec<Blob>,
}

/// Neighbors of `coord` that lie inside `shape`.
fn neighbors(shape: Shape, coord: VoxelCoord) -> impl Iterator<Item = VoxelCoord> {
    NEIGHBORS_26.iter().filter_map(move |&[dz, dy, dx]| {
        let n = VoxelCoord::new(
            coord.z.checked_add_signed(dz)?,
            coord.y.checked_add_signed(dy)?,
            coord.x.checked_add_signed(dx)?,
        );
        shape.contains(n).then_some(n)
    })
}

/// Labels 26-connected components of painted voxels.
///
/// Ids are assigned in scan order of each component's first voxel.
#[must_use]
pub fn label_blobs<T: LabelValue>(painted: &Volume<T>) -> BlobLabeling {
    let shape = painted.shape();
    let values = painted.as_slice();
    let mut labels: Volume<u32> = Volume::zeros(shape);
    let mut blobs = Vec::new();
    let mut queue = VecDeque::new();

    {
        let ids = labels.as_mut_slice();
        for start in 0..values.len() {
            if ids[start] != 0 || !values[start].is_painted() {
                continue;
            }

            // More than u32::MAX - 1 blobs needs > 16 GiB of labels; the last
            // id is shared past that point.
            let id = u32::try_from(blobs.len() + 1).unwrap_or(u32::MAX);
            let mut blob = Blob::start(id, shape.coord(start));
            ids[start] = id;
            queue.push_back(start);

            while let Some(index) = queue.pop_front() {
                let coord = shape.coord(index);
                blob.add(coord);

                for n in neighbors(shape, coord) {
                    let ni = shape.index_unchecked(n);
                    if ids[ni] == 0 && values[ni].is_painted() {
                        ids[ni] = id;
                        queue.push_back(ni);
                    }
                }
            }

            blobs.push(blob);
        }
    }

    BlobLabeling { labels, blobs }
}

/// Reduces every painted blob of one marker layer to its centroid.
///
/// An all-zero layer yields an empty sequence.
#[must_use]
pub fn extract_centroids<T: LabelValue>(class: MarkerClass, painted: &Volume<T>) -> Vec<Centroid> {
    let labeling = label_blobs(painted);

    tracing::debug!(
        "{} layer: {} painted blob(s) in volume {}",
        class,
        labeling.blobs.len(),
        painted.shape()
    );

    labeling
        .blobs
        .iter()
        .map(|blob| Centroid {
            class,
            position: blob.centroid(),
            voxel_count: blob.voxel_count,
        })
        .collect()
}
