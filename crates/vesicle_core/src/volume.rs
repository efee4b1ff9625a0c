//! # Dense Volumes
//!
//! A `Volume<T>` is one contiguous buffer plus its `Shape`. Raw images,
//! painted marker layers, per-class sphere volumes and the final ground truth
//! are all volumes; sharing one type keeps shape checks in one place.
//!
//! ## Memory Layout
//!
//! `data[(z * shape.y + y) * shape.x + x]`, so the buffer can be handed to an
//! image encoder as-is through [`Volume::as_bytes`].

use crate::error::{VolumeError, VolumeResult};
use crate::label::LabelValue;
use crate::roi::{Cropped, Roi};
use crate::shape::{Shape, VoxelCoord};

/// A dense 3D array indexed `(z, y, x)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume<T> {
    /// Extent along each axis.
    shape: Shape,
    /// Voxel values, z-major.
    data: Vec<T>,
}

impl<T: LabelValue> Volume<T> {
    /// Creates a volume filled with the default (zero) value.
    #[must_use]
    pub fn zeros(shape: Shape) -> Self {
        Self::filled(shape, T::default())
    }

    /// Creates a volume with every voxel set to `value`.
    #[must_use]
    pub fn filled(shape: Shape, value: T) -> Self {
        Self {
            shape,
            data: vec![value; shape.len()],
        }
    }

    /// Creates a zeroed volume with the same shape as `other`.
    ///
    /// This is how a fresh, empty marker layer is made for a loaded image.
    #[must_use]
    pub fn zeros_like<U>(other: &Volume<U>) -> Self {
        Self::zeros(other.shape)
    }

    /// Wraps an existing z-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::LengthMismatch`] if `data.len() != shape.len()`.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> VolumeResult<Self> {
        if data.len() != shape.len() {
            return Err(VolumeError::LengthMismatch {
                shape,
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Gets the value at a coordinate, `None` outside the volume.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<T> {
        self.shape.index(coord).map(|index| self.data[index])
    }

    /// Sets the value at a coordinate.
    ///
    /// Writes outside the volume are ignored.
    #[inline]
    pub fn set(&mut self, coord: VoxelCoord, value: T) {
        if let Some(index) = self.shape.index(coord) {
            self.data[index] = value;
        }
    }

    /// Number of painted (nonzero) voxels.
    #[must_use]
    pub fn count_painted(&self) -> usize {
        self.data.iter().filter(|v| v.is_painted()).count()
    }

    /// Number of voxels equal to `value`.
    #[must_use]
    pub fn count_value(&self, value: T) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Iterates over painted voxels in scan order.
    pub fn painted(&self) -> impl Iterator<Item = (VoxelCoord, T)> + '_ {
        let shape = self.shape;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_painted())
            .map(move |(index, &v)| (shape.coord(index), v))
    }

    /// Raw buffer as bytes, for encoders that take a byte slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Copies the half-open region `roi` into a new volume.
    ///
    /// The returned offset is the region's origin in this volume, so
    /// coordinates found in the crop can be mapped back.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::RoiOutOfBounds`] if the region reaches past
    /// this volume.
    pub fn crop(&self, roi: &Roi) -> VolumeResult<Cropped<T>> {
        roi.check_within(self.shape)?;

        let (start, end) = (roi.start(), roi.end());
        let out_shape = roi.shape();
        let mut data = Vec::with_capacity(out_shape.len());
        for z in start.z..end.z {
            for y in start.y..end.y {
                let row = self.shape.index_unchecked(VoxelCoord::new(z, y, start.x));
                data.extend_from_slice(&self.data[row..row + out_shape.x]);
            }
        }

        Ok(Cropped {
            volume: Self {
                shape: out_shape,
                data,
            },
            offset: roi.offset(),
        })
    }
}

impl<T> Volume<T> {
    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the volume has no voxels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Voxel values in scan order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable voxel values in scan order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the volume, returning the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
