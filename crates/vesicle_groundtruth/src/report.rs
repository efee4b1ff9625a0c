//! # Run Reports
//!
//! What one invocation did, for logs and for callers that want to surface
//! dropped markers to the annotator.

use std::fmt;

use crate::class::{MarkerClass, PerClass};

/// Stage counts for one marker class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassReport {
    /// Painted blobs found.
    pub blobs: usize,
    /// Centroids that became spheres.
    pub accepted: usize,
    /// Centroids dropped by the separation rule.
    pub rejected: usize,
    /// Spheres cut by the volume edge.
    pub clipped_spheres: usize,
    /// Output voxels carrying this class's label.
    pub voxels: usize,
}

/// Summary of one ground-truth computation.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundTruthReport {
    /// Per-axis sphere radii in voxels, `[z, y, x]`.
    pub radii: [f64; 3],
    /// Required centroid separation in voxels.
    pub threshold: u64,
    /// Per-class stage counts.
    pub classes: PerClass<ClassReport>,
    /// Voxels both classes claimed.
    pub collisions: usize,
    /// Output voxels that are not background.
    pub labeled_voxels: usize,
}

impl GroundTruthReport {
    /// Counts for one class.
    #[inline]
    #[must_use]
    pub const fn class(&self, class: MarkerClass) -> &ClassReport {
        self.classes.get(class)
    }

    /// Centroids dropped across both classes.
    #[must_use]
    pub const fn total_rejected(&self) -> usize {
        self.classes.pos.rejected + self.classes.neg.rejected
    }
}

impl fmt::Display for GroundTruthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [rz, ry, rx] = self.radii;
        writeln!(
            f,
            "radii (z, y, x) = ({rz:.2}, {ry:.2}, {rx:.2}), threshold = {}",
            self.threshold
        )?;
        for (class, report) in self.classes.iter() {
            writeln!(
                f,
                "{class}: {} blob(s), {} accepted, {} rejected, {} clipped, {} voxel(s)",
                report.blobs,
                report.accepted,
                report.rejected,
                report.clipped_spheres,
                report.voxels
            )?;
        }
        write!(f, "collisions = {}, labeled = {}", self.collisions, self.labeled_voxels)
    }
}
