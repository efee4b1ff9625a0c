//! # Shapes and Voxel Coordinates
//!
//! Volumes are indexed `(z, y, x)` and stored z-major: the flat index of a
//! voxel is `z * height * width + y * width + x`. Scanning the flat buffer in
//! ascending order is therefore the canonical, deterministic scan order used
//! by every pipeline stage.

use std::fmt;

use crate::geometry::Point3;

/// Extent of a volume along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of slices (first axis).
    pub z: usize,
    /// Number of rows (second axis).
    pub y: usize,
    /// Number of columns (third axis).
    pub x: usize,
}

impl Shape {
    /// Creates a new shape.
    #[inline]
    #[must_use]
    pub const fn new(z: usize, y: usize, x: usize) -> Self {
        Self { z, y, x }
    }

    /// Creates a shape from a `[z, y, x]` array.
    #[inline]
    #[must_use]
    pub const fn from_array(dims: [usize; 3]) -> Self {
        Self::new(dims[0], dims[1], dims[2])
    }

    /// Returns the extents as `[z, y, x]`.
    #[inline]
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.z, self.y, self.x]
    }

    /// Total number of voxels.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.z * self.y * self.x
    }

    /// Returns true if any axis has zero extent.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if the coordinate lies inside the volume.
    #[inline]
    #[must_use]
    pub const fn contains(self, coord: VoxelCoord) -> bool {
        coord.z < self.z && coord.y < self.y && coord.x < self.x
    }

    /// Flat buffer index of a coordinate, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub const fn index(self, coord: VoxelCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(self.index_unchecked(coord))
        } else {
            None
        }
    }

    /// Flat buffer index without the bounds check.
    ///
    /// The caller guarantees `self.contains(coord)`.
    #[inline]
    #[must_use]
    pub const fn index_unchecked(self, coord: VoxelCoord) -> usize {
        (coord.z * self.y + coord.y) * self.x + coord.x
    }

    /// Coordinate of a flat buffer index.
    ///
    /// The caller guarantees `index < self.len()`.
    #[inline]
    #[must_use]
    pub const fn coord(self, index: usize) -> VoxelCoord {
        let plane = self.y * self.x;
        let z = index / plane;
        let rem = index % plane;
        VoxelCoord::new(z, rem / self.x, rem % self.x)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.z, self.y, self.x)
    }
}

/// Integer position of one voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoxelCoord {
    /// Slice index.
    pub z: usize,
    /// Row index.
    pub y: usize,
    /// Column index.
    pub x: usize,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[inline]
    #[must_use]
    pub const fn new(z: usize, y: usize, x: usize) -> Self {
        Self { z, y, x }
    }

    /// Returns the coordinate as `[z, y, x]`.
    #[inline]
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.z, self.y, self.x]
    }

    /// Voxel center as a real-valued point.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_point(self) -> Point3 {
        Point3::new(self.z as f64, self.y as f64, self.x as f64)
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.z, self.y, self.x)
    }
}
