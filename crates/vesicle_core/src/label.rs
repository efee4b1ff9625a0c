//! # Label Values
//!
//! Element types that can be stored in a volume. Painted marker volumes,
//! raw images and ground-truth labels are all plain numeric buffers; the
//! only thing the pipeline needs to ask of a value is whether it is
//! "painted" (differs from zero).

use bytemuck::{Pod, Zeroable};

/// Marker trait for volume element types.
///
/// Values must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Pod`: Plain old data, the buffer can be viewed as bytes
/// - `Default`: The default value is the unpainted/background value
pub trait LabelValue: Copy + Pod + Zeroable + Default + PartialEq + Send + Sync + 'static {
    /// Returns true if this voxel carries a brush stroke.
    ///
    /// Any value other than zero counts; distinct nonzero values carry no
    /// extra meaning.
    #[inline]
    fn is_painted(self) -> bool {
        self != Self::default()
    }
}

macro_rules! impl_label_value {
    ($($ty:ty),* $(,)?) => {
        $(impl LabelValue for $ty {})*
    };
}

impl_label_value!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
