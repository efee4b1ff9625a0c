//! # Ground Truth Generator
//!
//! Runs the four stages for both marker classes and returns the composite
//! volume together with a report. A generator holds only validated
//! configuration; every call to [`GroundTruthGenerator::compute`] starts
//! from scratch.

use vesicle_core::{LabelValue, Roi, Shape, Volume, VoxelOffset};

use crate::centroid::{extract_centroids, Centroid};
use crate::class::{MarkerClass, PerClass};
use crate::composite::VolumeCompositor;
use crate::config::{GroundTruthConfig, SeparationScope};
use crate::error::{ConfigError, GroundTruthError, GroundTruthResult};
use crate::report::{ClassReport, GroundTruthReport};
use crate::separation::{SeparationEnforcer, SeparationOutcome};
use crate::sphere::{RasterSummary, SphereRasterizer};

/// The painted `pos` and `neg` marker layers.
pub type PaintedLabels<'a, T> = PerClass<&'a Volume<T>>;

/// Output of one computation.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundTruth {
    /// Composite label volume, same shape as the raw image.
    pub volume: Volume<u32>,
    /// Accepted and rejected centroids per class.
    pub centroids: PerClass<SeparationOutcome>,
    /// Stage counts.
    pub report: GroundTruthReport,
}

impl GroundTruth {
    /// Centroids that became spheres, for one class.
    #[inline]
    #[must_use]
    pub fn accepted(&self, class: MarkerClass) -> &[Centroid] {
        &self.centroids.get(class).accepted
    }
}

/// Turns painted markers into a ground-truth volume.
#[derive(Clone, Debug)]
pub struct GroundTruthGenerator {
    config: GroundTruthConfig,
    enforcer: SeparationEnforcer,
    rasterizer: SphereRasterizer,
    compositor: VolumeCompositor,
}

impl GroundTruthGenerator {
    /// Validates `config` and builds the stages.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by
    /// [`GroundTruthConfig::validate`].
    pub fn new(config: GroundTruthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let enforcer = SeparationEnforcer::new(config.min_distance_voxels()?);
        let rasterizer = SphereRasterizer::new(config.diameter, config.resolution)?;
        let compositor = VolumeCompositor::new(config.precedence, config.labels);

        let [rz, ry, rx] = rasterizer.radii();
        tracing::debug!(
            "generator ready: radii ({:.2}, {:.2}, {:.2}) voxels, separation {} voxels",
            rz,
            ry,
            rx,
            enforcer.threshold()
        );

        Ok(Self {
            config,
            enforcer,
            rasterizer,
            compositor,
        })
    }

    /// The validated configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GroundTruthConfig {
        &self.config
    }

    /// Computes the ground truth for a raw image of shape `raw_shape`.
    ///
    /// # Errors
    ///
    /// Returns [`GroundTruthError::ShapeMismatch`] if a marker layer's shape
    /// differs from `raw_shape`, checking `pos` first. Nothing is computed
    /// in that case.
    pub fn compute<T: LabelValue>(
        &self,
        raw_shape: Shape,
        painted: &PaintedLabels<'_, T>,
    ) -> GroundTruthResult<GroundTruth> {
        let span = tracing::info_span!("compute_ground_truth", shape = %raw_shape);
        let _enter = span.enter();

        check_shapes(raw_shape, painted)?;

        // Extraction
        let extracted = painted.map(extract_centroids);
        let blobs = extracted.each_ref().map(|_, list| list.len());

        // Separation
        let candidates = extracted.each_ref().map(|_, list| list.as_slice());
        let centroids = match self.config.separation {
            SeparationScope::PerClass => self.enforcer.enforce_per_class(candidates),
            SeparationScope::Joint => self.enforcer.enforce_joint(candidates),
        };

        // Rasterization
        let workers = self.config.worker_count();
        let rastered: PerClass<(Volume<u32>, RasterSummary)> =
            centroids.each_ref().map(|class, outcome| {
                let mut spheres = Volume::zeros(raw_shape);
                let summary = self.rasterizer.rasterize_all(
                    &outcome.accepted,
                    self.config.labels.for_class(class),
                    &mut spheres,
                    workers,
                );
                (spheres, summary)
            });

        // Compositing
        let (volume, stats) = self
            .compositor
            .composite(rastered.each_ref().map(|_, (spheres, _)| spheres))?;

        let classes = centroids.each_ref().map(|class, outcome| ClassReport {
            blobs: *blobs.get(class),
            accepted: outcome.accepted.len(),
            rejected: outcome.rejected.len(),
            clipped_spheres: rastered.get(class).1.clipped_spheres,
            voxels: stats.voxels(class),
        });

        let report = GroundTruthReport {
            radii: self.rasterizer.radii(),
            threshold: self.enforcer.threshold(),
            classes,
            collisions: stats.collisions,
            labeled_voxels: stats.pos_voxels + stats.neg_voxels,
        };

        tracing::info!(
            "ground truth: pos {}/{} accepted, neg {}/{} accepted, \
             {} labeled voxel(s), {} collision(s)",
            report.class(MarkerClass::Pos).accepted,
            report.class(MarkerClass::Pos).blobs,
            report.class(MarkerClass::Neg).accepted,
            report.class(MarkerClass::Neg).blobs,
            report.labeled_voxels,
            report.collisions
        );
        if report.total_rejected() > 0 {
            tracing::debug!(
                "{} marker(s) fell within {} voxels of an accepted one",
                report.total_rejected(),
                report.threshold
            );
        }

        Ok(GroundTruth {
            volume,
            centroids,
            report,
        })
    }

    /// Like [`GroundTruthGenerator::compute`], taking the shape from the raw
    /// image itself.
    ///
    /// # Errors
    ///
    /// As [`GroundTruthGenerator::compute`].
    pub fn compute_for<R, T: LabelValue>(
        &self,
        raw: &Volume<R>,
        painted: &PaintedLabels<'_, T>,
    ) -> GroundTruthResult<GroundTruth> {
        self.compute(raw.shape(), painted)
    }

    /// Computes the ground truth for the region `roi` of the marker layers.
    ///
    /// The result covers only the region. The returned offset maps its
    /// coordinates back into the full image.
    ///
    /// # Errors
    ///
    /// Returns [`GroundTruthError::ShapeMismatch`] as
    /// [`GroundTruthGenerator::compute`] does, or [`GroundTruthError::Volume`]
    /// if `roi` reaches past `raw_shape`.
    pub fn compute_cropped<T: LabelValue>(
        &self,
        raw_shape: Shape,
        painted: &PaintedLabels<'_, T>,
        roi: &Roi,
    ) -> GroundTruthResult<(GroundTruth, VoxelOffset)> {
        check_shapes(raw_shape, painted)?;

        let pos = painted.pos.crop(roi)?;
        let neg = painted.neg.crop(roi)?;
        tracing::debug!("cropped to {} at {}", roi.shape(), pos.offset);

        let gt = self.compute(roi.shape(), &PerClass::new(&pos.volume, &neg.volume))?;
        Ok((gt, pos.offset))
    }
}

/// Every marker layer must match the raw image, `pos` checked first.
fn check_shapes<T>(raw_shape: Shape, painted: &PaintedLabels<'_, T>) -> GroundTruthResult<()> {
    for (class, layer) in painted.iter() {
        if layer.shape() != raw_shape {
            return Err(GroundTruthError::ShapeMismatch {
                class,
                expected: raw_shape,
                found: layer.shape(),
            });
        }
    }
    Ok(())
}
