//! Real-valued voxel-space geometry.
//!
//! `Point3` positions live in voxel-index space (a centroid can sit between
//! voxel centers). `Resolution` is the physical size of one voxel along each
//! axis and is what turns a physical diameter into per-axis voxel radii.

use serde::{Deserialize, Serialize};

/// A real-valued position in voxel-index space, `(z, y, x)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// Slice coordinate.
    pub z: f64,
    /// Row coordinate.
    pub y: f64,
    /// Column coordinate.
    pub x: f64,
}

impl Point3 {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(z: f64, y: f64, x: f64) -> Self {
        Self { z, y, x }
    }

    /// Origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Returns the point as `[z, y, x]`.
    #[inline]
    #[must_use]
    pub const fn as_array(self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }

    /// Distance squared (avoids sqrt)
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let d = self - other;
        d.z * d.z + d.y * d.y + d.x * d.x
    }

    /// Euclidean distance in voxel-index space.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl std::ops::Add for Point3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.z + rhs.z, self.y + rhs.y, self.x + rhs.x)
    }
}

impl std::ops::Sub for Point3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.z - rhs.z, self.y - rhs.y, self.x - rhs.x)
    }
}

impl std::ops::Mul<f64> for Point3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.z * rhs, self.y * rhs, self.x * rhs)
    }
}

impl std::ops::Div<f64> for Point3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.z / rhs, self.y / rhs, self.x / rhs)
    }
}

/// Physical size of one voxel along each axis.
///
/// Serialized as a `[z, y, x]` array so configuration files read
/// `resolution = [60.0, 60.0, 60.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Resolution {
    /// Physical slice thickness.
    pub z: f64,
    /// Physical row spacing.
    pub y: f64,
    /// Physical column spacing.
    pub x: f64,
}

impl Resolution {
    /// Creates a new resolution.
    #[inline]
    #[must_use]
    pub const fn new(z: f64, y: f64, x: f64) -> Self {
        Self { z, y, x }
    }

    /// Same spacing on every axis.
    #[inline]
    #[must_use]
    pub const fn isotropic(spacing: f64) -> Self {
        Self::new(spacing, spacing, spacing)
    }

    /// Returns the spacing as `[z, y, x]`.
    #[inline]
    #[must_use]
    pub const fn as_array(self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }

}

impl From<[f64; 3]> for Resolution {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Resolution> for [f64; 3] {
    fn from(value: Resolution) -> Self {
        value.as_array()
    }
}
