//! # Separation Enforcement
//!
//! Two markers painted on the same vesicle must not produce two spheres.
//! The rule works on the voxel grid regardless of anisotropy: accepted
//! centroids are at least `T = 2 * min_distance + 1` voxels apart, measured
//! as Euclidean distance between voxel-space positions.
//!
//! The pass is greedy in extraction order: a candidate is accepted iff it is
//! at least `T` from every centroid accepted before it. If everything is
//! mutually too close, exactly one centroid survives.

use crate::centroid::Centroid;
use crate::class::{MarkerClass, PerClass};

/// Accepted and discarded centroids, both in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeparationOutcome {
    /// Centroids that become spheres.
    pub accepted: Vec<Centroid>,
    /// Centroids too close to an earlier accepted one.
    pub rejected: Vec<Centroid>,
}

impl SeparationOutcome {
    /// Splits a mixed outcome back into per-class outcomes.
    #[must_use]
    pub fn split_by_class(self) -> PerClass<Self> {
        let mut out = PerClass::<Self>::default();
        for centroid in self.accepted {
            out.get_mut(centroid.class).accepted.push(centroid);
        }
        for centroid in self.rejected {
            out.get_mut(centroid.class).rejected.push(centroid);
        }
        out
    }
}

/// Applies the minimum-distance rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeparationEnforcer {
    /// `min_distance` in voxels.
    min_distance: u32,
}

impl SeparationEnforcer {
    /// Creates an enforcer for a minimum distance in voxels.
    #[inline]
    #[must_use]
    pub const fn new(min_distance: u32) -> Self {
        Self { min_distance }
    }

    /// Required separation `T = 2 * min_distance + 1`, in voxels.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        2 * self.min_distance as u64 + 1
    }

    /// Greedily thins one ordered sequence of centroids.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn enforce(&self, centroids: &[Centroid]) -> SeparationOutcome {
        let t = self.threshold() as f64;
        let t_squared = t * t;

        let mut outcome = SeparationOutcome {
            accepted: Vec::with_capacity(centroids.len()),
            rejected: Vec::new(),
        };

        for &candidate in centroids {
            let clear = outcome
                .accepted
                .iter()
                .all(|kept| kept.position.distance_squared(candidate.position) >= t_squared);

            if clear {
                outcome.accepted.push(candidate);
            } else {
                outcome.rejected.push(candidate);
            }
        }

        outcome
    }

    /// Thins each class independently.
    #[must_use]
    pub fn enforce_per_class(
        &self,
        centroids: PerClass<&[Centroid]>,
    ) -> PerClass<SeparationOutcome> {
        centroids.map(|class, list| {
            let outcome = self.enforce(list);
            log_outcome(class, &outcome);
            outcome
        })
    }

    /// Thins both classes as one sequence: all `pos` centroids in extraction
    /// order, then all `neg` centroids.
    #[must_use]
    pub fn enforce_joint(&self, centroids: PerClass<&[Centroid]>) -> PerClass<SeparationOutcome> {
        let combined: Vec<Centroid> = centroids
            .pos
            .iter()
            .chain(centroids.neg.iter())
            .copied()
            .collect();

        let outcomes = self.enforce(&combined).split_by_class();
        for (class, outcome) in outcomes.iter() {
            log_outcome(class, outcome);
        }
        outcomes
    }
}

fn log_outcome(class: MarkerClass, outcome: &SeparationOutcome) {
    tracing::debug!(
        "{} separation: {} accepted, {} rejected",
        class,
        outcome.accepted.len(),
        outcome.rejected.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesicle_core::Point3;

    fn at(class: MarkerClass, z: f64, y: f64, x: f64) -> Centroid {
        Centroid {
            class,
            position: Point3::new(z, y, x),
            voxel_count: 1,
        }
    }

    #[test]
    fn test_threshold() {
        assert_eq!(SeparationEnforcer::new(0).threshold(), 1);
        assert_eq!(SeparationEnforcer::new(1).threshold(), 3);
        assert_eq!(SeparationEnforcer::new(2).threshold(), 5);
        assert_eq!(SeparationEnforcer::new(u32::MAX).threshold(), 8_589_934_591);
    }

    #[test]
    fn test_distance_four_collapses() {
        let enforcer = SeparationEnforcer::new(2);
        let input = [
            at(MarkerClass::Pos, 10.0, 10.0, 10.0),
            at(MarkerClass::Pos, 10.0, 10.0, 14.0),
        ];
        let outcome = enforcer.enforce(&input);
        assert_eq!(outcome.accepted, vec![input[0]]);
        assert_eq!(outcome.rejected, vec![input[1]]);
    }

    #[test]
    fn test_distance_exactly_threshold_survives() {
        let enforcer = SeparationEnforcer::new(2);
        let input = [
            at(MarkerClass::Pos, 10.0, 10.0, 10.0),
            at(MarkerClass::Pos, 10.0, 13.0, 14.0),
        ];
        let outcome = enforcer.enforce(&input);
        assert_eq!(outcome.accepted.len(), 2);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_rejected_does_not_block_later_candidates() {
        // b is too close to a, c is too close to b but clear of a.
        let enforcer = SeparationEnforcer::new(1);
        let a = at(MarkerClass::Pos, 0.0, 0.0, 0.0);
        let b = at(MarkerClass::Pos, 0.0, 0.0, 2.0);
        let c = at(MarkerClass::Pos, 0.0, 0.0, 4.0);

        let outcome = enforcer.enforce(&[a, b, c]);
        assert_eq!(outcome.accepted, vec![a, c]);
        assert_eq!(outcome.rejected, vec![b]);
    }

    #[test]
    fn test_total_collapse_keeps_first() {
        let enforcer = SeparationEnforcer::new(10);
        let input: Vec<_> = (0..6)
            .map(|i| at(MarkerClass::Neg, 5.0, 5.0, f64::from(i)))
            .collect();
        let outcome = enforcer.enforce(&input);
        assert_eq!(outcome.accepted, vec![input[0]]);
        assert_eq!(outcome.rejected.len(), 5);
    }

    #[test]
    fn test_zero_min_distance_only_merges_coincident() {
        let enforcer = SeparationEnforcer::new(0);
        let input = [
            at(MarkerClass::Pos, 1.0, 1.0, 1.0),
            at(MarkerClass::Pos, 1.0, 1.0, 2.0),
            at(MarkerClass::Pos, 1.0, 1.0, 2.5),
        ];
        let outcome = enforcer.enforce(&input);
        assert_eq!(outcome.accepted.len(), 2);
    }

    #[test]
    fn test_per_class_ignores_other_class() {
        let enforcer = SeparationEnforcer::new(2);
        let pos = [at(MarkerClass::Pos, 5.0, 5.0, 5.0)];
        let neg = [at(MarkerClass::Neg, 5.0, 5.0, 6.0)];

        let outcomes = enforcer.enforce_per_class(PerClass::new(&pos[..], &neg[..]));
        assert_eq!(outcomes.pos.accepted.len(), 1);
        assert_eq!(outcomes.neg.accepted.len(), 1);
    }

    #[test]
    fn test_joint_lets_pos_win() {
        let enforcer = SeparationEnforcer::new(2);
        let pos = [at(MarkerClass::Pos, 5.0, 5.0, 5.0)];
        let neg = [
            at(MarkerClass::Neg, 5.0, 5.0, 6.0),
            at(MarkerClass::Neg, 5.0, 5.0, 20.0),
        ];

        let outcomes = enforcer.enforce_joint(PerClass::new(&pos[..], &neg[..]));
        assert_eq!(outcomes.pos.accepted, vec![pos[0]]);
        assert_eq!(outcomes.neg.accepted, vec![neg[1]]);
        assert_eq!(outcomes.neg.rejected, vec![neg[0]]);
    }
}
