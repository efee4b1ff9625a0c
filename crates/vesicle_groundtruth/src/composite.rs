//! # Compositing
//!
//! Merges the per-class sphere volumes into the final ground truth. In the
//! per-class volumes `0` means unclaimed; any other value means the voxel
//! lies inside at least one sphere of that class.
//!
//! | pos | neg | output            |
//! |-----|-----|-------------------|
//! | no  | no  | background        |
//! | yes | no  | pos label         |
//! | no  | yes | neg label         |
//! | yes | yes | precedence winner |

use vesicle_core::Volume;

use crate::class::{MarkerClass, PerClass};
use crate::config::{ClassLabels, Precedence};
use crate::error::{GroundTruthError, GroundTruthResult};

/// Voxel counts of one compositing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Voxels claimed by both classes.
    pub collisions: usize,
    /// Voxels labeled `pos` in the output.
    pub pos_voxels: usize,
    /// Voxels labeled `neg` in the output.
    pub neg_voxels: usize,
}

impl CompositeStats {
    /// Output voxels of one class.
    #[inline]
    #[must_use]
    pub const fn voxels(&self, class: MarkerClass) -> usize {
        match class {
            MarkerClass::Pos => self.pos_voxels,
            MarkerClass::Neg => self.neg_voxels,
        }
    }
}

/// Applies the collision rule voxel by voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VolumeCompositor {
    precedence: Precedence,
    labels: ClassLabels,
}

impl VolumeCompositor {
    /// Creates a compositor.
    #[inline]
    #[must_use]
    pub const fn new(precedence: Precedence, labels: ClassLabels) -> Self {
        Self { precedence, labels }
    }

    /// Merges `pos` and `neg` sphere volumes.
    ///
    /// # Errors
    ///
    /// Returns [`GroundTruthError::ShapeMismatch`] if the `neg` volume
    /// differs in shape from the `pos` volume.
    pub fn composite(
        &self,
        spheres: PerClass<&Volume<u32>>,
    ) -> GroundTruthResult<(Volume<u32>, CompositeStats)> {
        let shape = spheres.pos.shape();
        if spheres.neg.shape() != shape {
            return Err(GroundTruthError::ShapeMismatch {
                class: MarkerClass::Neg,
                expected: shape,
                found: spheres.neg.shape(),
            });
        }

        let winner = self.precedence.winner();
        let mut stats = CompositeStats::default();
        let mut out = Volume::filled(shape, self.labels.background);

        for ((dst, &p), &n) in out
            .as_mut_slice()
            .iter_mut()
            .zip(spheres.pos.as_slice())
            .zip(spheres.neg.as_slice())
        {
            let class = match (p != 0, n != 0) {
                (false, false) => continue,
                (true, false) => MarkerClass::Pos,
                (false, true) => MarkerClass::Neg,
                (true, true) => {
                    stats.collisions += 1;
                    winner
                }
            };
            match class {
                MarkerClass::Pos => stats.pos_voxels += 1,
                MarkerClass::Neg => stats.neg_voxels += 1,
            }
            *dst = self.labels.for_class(class);
        }

        if stats.collisions > 0 {
            tracing::debug!("{} contested voxel(s) went to {}", stats.collisions, winner);
        }

        Ok((out, stats))
    }
}
