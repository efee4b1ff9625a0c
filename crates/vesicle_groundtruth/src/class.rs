//! # Marker Classes
//!
//! Annotators paint two kinds of marker: `pos` (a vesicle) and `neg`
//! (something that looks like one but is not). Both run through the same
//! pipeline; `PerClass` carries one value per class so the pipeline is
//! written once and instantiated twice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The class a painted marker belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerClass {
    /// Positive marker.
    Pos,
    /// Negative marker.
    Neg,
}

impl MarkerClass {
    /// Both classes, in processing order.
    pub const ALL: [Self; 2] = [Self::Pos, Self::Neg];

    /// Short lowercase name, as used for layer names.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::Neg => "neg",
        }
    }
}

impl fmt::Display for MarkerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per marker class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PerClass<T> {
    /// Value for [`MarkerClass::Pos`].
    pub pos: T,
    /// Value for [`MarkerClass::Neg`].
    pub neg: T,
}

impl<T> PerClass<T> {
    /// Creates a pair from the `pos` and `neg` values.
    #[inline]
    #[must_use]
    pub const fn new(pos: T, neg: T) -> Self {
        Self { pos, neg }
    }

    /// Value for one class.
    #[inline]
    #[must_use]
    pub const fn get(&self, class: MarkerClass) -> &T {
        match class {
            MarkerClass::Pos => &self.pos,
            MarkerClass::Neg => &self.neg,
        }
    }

    /// Mutable value for one class.
    #[inline]
    pub fn get_mut(&mut self, class: MarkerClass) -> &mut T {
        match class {
            MarkerClass::Pos => &mut self.pos,
            MarkerClass::Neg => &mut self.neg,
        }
    }

    /// Applies `f` to each class's value.
    pub fn map<U>(self, mut f: impl FnMut(MarkerClass, T) -> U) -> PerClass<U> {
        PerClass {
            pos: f(MarkerClass::Pos, self.pos),
            neg: f(MarkerClass::Neg, self.neg),
        }
    }

    /// Borrows both values.
    #[inline]
    #[must_use]
    pub const fn each_ref(&self) -> PerClass<&T> {
        PerClass {
            pos: &self.pos,
            neg: &self.neg,
        }
    }

    /// Iterates `(class, value)` in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerClass, &T)> {
        MarkerClass::ALL.into_iter().map(move |class| (class, self.get(class)))
    }
}
