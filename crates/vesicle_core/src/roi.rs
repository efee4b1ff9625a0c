//! # Regions of Interest
//!
//! Large acquisitions are labelled on a cropped sub-volume. The crop keeps
//! its origin in the parent volume so that anything found in the crop can be
//! placed back into the full image.

use std::fmt;

use crate::error::{VolumeError, VolumeResult};
use crate::geometry::Point3;
use crate::shape::{Shape, VoxelCoord};
use crate::volume::Volume;

/// A half-open box `[start, end)` in voxel coordinates.
///
/// Only built through [`Roi::new`], so `end` is past `start` on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Roi {
    start: VoxelCoord,
    end: VoxelCoord,
}

impl Roi {
    /// Creates a region of interest.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::EmptyRoi`] if `end` is not past `start` on
    /// every axis.
    pub fn new(start: VoxelCoord, end: VoxelCoord) -> VolumeResult<Self> {
        for ((axis, lo), hi) in ['z', 'y', 'x']
            .into_iter()
            .zip(start.as_array())
            .zip(end.as_array())
        {
            if hi <= lo {
                return Err(VolumeError::EmptyRoi { axis });
            }
        }
        Ok(Self { start, end })
    }

    /// Region from a slice range and a rectangle, the way crops are drawn:
    /// pick slices `[z_start, z_end)`, then drag a `(y, x)` rectangle.
    ///
    /// # Errors
    ///
    /// Same as [`Roi::new`].
    pub fn from_slices_and_rect(
        z_start: usize,
        z_end: usize,
        top_left: (usize, usize),
        bottom_right: (usize, usize),
    ) -> VolumeResult<Self> {
        Self::new(
            VoxelCoord::new(z_start, top_left.0, top_left.1),
            VoxelCoord::new(z_end, bottom_right.0, bottom_right.1),
        )
    }

    /// Inclusive corner.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> VoxelCoord {
        self.start
    }

    /// Exclusive corner.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> VoxelCoord {
        self.end
    }

    /// Extent of the cropped volume.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Shape {
        Shape::new(
            self.end.z - self.start.z,
            self.end.y - self.start.y,
            self.end.x - self.start.x,
        )
    }

    /// Origin of the region in its parent volume.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> VoxelOffset {
        VoxelOffset {
            z: self.start.z,
            y: self.start.y,
            x: self.start.x,
        }
    }

    /// Checks the region fits inside a parent of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::RoiOutOfBounds`] naming the first axis that
    /// overflows.
    pub fn check_within(&self, parent: Shape) -> VolumeResult<()> {
        for ((axis, end), size) in ['z', 'y', 'x']
            .into_iter()
            .zip(self.end.as_array())
            .zip(parent.as_array())
        {
            if end > size {
                return Err(VolumeError::RoiOutOfBounds { axis, end, size });
            }
        }
        Ok(())
    }
}

/// Position of a cropped volume's origin inside its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VoxelOffset {
    /// Slice offset.
    pub z: usize,
    /// Row offset.
    pub y: usize,
    /// Column offset.
    pub x: usize,
}

impl VoxelOffset {
    /// Maps a coordinate in the crop to the parent volume.
    #[inline]
    #[must_use]
    pub const fn to_parent(self, coord: VoxelCoord) -> VoxelCoord {
        VoxelCoord::new(coord.z + self.z, coord.y + self.y, coord.x + self.x)
    }

    /// Maps a real-valued point in the crop to the parent volume.
    #[inline]
    #[must_use]
    pub fn point_to_parent(self, point: Point3) -> Point3 {
        point + VoxelCoord::new(self.z, self.y, self.x).to_point()
    }
}

impl fmt::Display for VoxelOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(z,y,x) = ({}, {}, {})", self.z, self.y, self.x)
    }
}

/// A sub-volume together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Cropped<T> {
    /// The copied region.
    pub volume: Volume<T>,
    /// Origin of the region in the parent.
    pub offset: VoxelOffset,
}
