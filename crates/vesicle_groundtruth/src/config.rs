//! # Generator Configuration
//!
//! Three numbers drive the geometry: the physical vesicle `diameter`, the
//! per-axis `resolution` in the same unit, and `min_distance` in voxels.
//! The rest decides policy where painted markers disagree.
//!
//! Configurations are plain TOML:
//!
//! ```toml
//! diameter = 300.0
//! resolution = [60.0, 60.0, 60.0]
//! min_distance = 1
//! precedence = "pos_over_neg"
//! separation = "per_class"
//! workers = 1
//!
//! [labels]
//! background = 0
//! pos = 1
//! neg = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use vesicle_core::Resolution;

use crate::class::MarkerClass;
use crate::error::ConfigError;

/// Values written into the ground-truth volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassLabels {
    /// Value of voxels no sphere covers.
    pub background: u32,
    /// Value of voxels inside a `pos` sphere.
    pub pos: u32,
    /// Value of voxels inside a `neg` sphere.
    pub neg: u32,
}

impl ClassLabels {
    /// Label id for a class.
    #[inline]
    #[must_use]
    pub const fn for_class(&self, class: MarkerClass) -> u32 {
        match class {
            MarkerClass::Pos => self.pos,
            MarkerClass::Neg => self.neg,
        }
    }

    /// Checks the ids can be told apart.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLabels`] if a class id is zero, the two
    /// class ids are equal, or either equals the background.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in MarkerClass::ALL {
            let id = self.for_class(class);
            if id == 0 {
                return Err(ConfigError::InvalidLabels(format!(
                    "{class} label must be nonzero"
                )));
            }
            if id == self.background {
                return Err(ConfigError::InvalidLabels(format!(
                    "{class} label {id} equals the background label"
                )));
            }
        }
        if self.pos == self.neg {
            return Err(ConfigError::InvalidLabels(format!(
                "pos and neg share label {}",
                self.pos
            )));
        }
        Ok(())
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self {
            background: 0,
            pos: 1,
            neg: 2,
        }
    }
}

/// Which class keeps a voxel both classes' spheres cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    /// `pos` wins collisions.
    #[default]
    PosOverNeg,
    /// `neg` wins collisions.
    NegOverPos,
}

impl Precedence {
    /// The class that keeps contested voxels.
    #[inline]
    #[must_use]
    pub const fn winner(self) -> MarkerClass {
        match self {
            Self::PosOverNeg => MarkerClass::Pos,
            Self::NegOverPos => MarkerClass::Neg,
        }
    }
}

/// Which centroids the minimum-distance rule compares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationScope {
    /// Each class is thinned on its own; overlap between classes is left
    /// to the compositor.
    #[default]
    PerClass,
    /// Both classes are thinned together, `pos` centroids first.
    Joint,
}

/// Everything the generator needs besides the volumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroundTruthConfig {
    /// Vesicle diameter in physical units.
    pub diameter: f64,
    /// Physical voxel size `[z, y, x]`, same unit as `diameter`.
    pub resolution: Resolution,
    /// Minimum separation parameter in voxels.
    ///
    /// Accepted centroids end up at least `2 * min_distance + 1` voxels
    /// apart. Signed so that a negative value in a file is reported rather
    /// than failing to parse.
    pub min_distance: i64,
    /// Collision rule for the compositor.
    pub precedence: Precedence,
    /// Scope of the separation rule.
    pub separation: SeparationScope,
    /// Rasterizer threads. `0` uses one per available core.
    pub workers: usize,
    /// Values written into the output.
    pub labels: ClassLabels,
}

impl Default for GroundTruthConfig {
    fn default() -> Self {
        Self {
            diameter: 300.0,
            resolution: Resolution::isotropic(60.0),
            min_distance: 1,
            precedence: Precedence::default(),
            separation: SeparationScope::default(),
            workers: 1,
            labels: ClassLabels::default(),
        }
    }
}

impl GroundTruthConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing keys take their default values. The result is not yet
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GroundTruthConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a value has no TOML form
    /// (for example a NaN diameter).
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks every value before any volume is touched.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking diameter,
    /// resolution, `min_distance`, then labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_diameter(self.diameter)?;
        validate_resolution(self.resolution)?;
        self.min_distance_voxels()?;
        self.labels.validate()
    }

    /// `min_distance` as an unsigned voxel count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeMinDistance`] or
    /// [`ConfigError::MinDistanceTooLarge`].
    pub fn min_distance_voxels(&self) -> Result<u32, ConfigError> {
        if self.min_distance < 0 {
            return Err(ConfigError::NegativeMinDistance(self.min_distance));
        }
        u32::try_from(self.min_distance)
            .map_err(|_| ConfigError::MinDistanceTooLarge(self.min_distance))
    }

    /// Number of rasterizer threads to use.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            self.workers
        }
    }
}

/// Checks a physical diameter.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDiameter`] unless the value is positive and
/// finite.
pub fn validate_diameter(diameter: f64) -> Result<(), ConfigError> {
    if diameter.is_finite() && diameter > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDiameter(diameter))
    }
}

/// Checks a resolution vector.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidResolution`] naming the first axis whose
/// spacing is not positive and finite.
pub fn validate_resolution(resolution: Resolution) -> Result<(), ConfigError> {
    for (axis, value) in ['z', 'y', 'x'].into_iter().zip(resolution.as_array()) {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::InvalidResolution { axis, value });
        }
    }
    Ok(())
}
