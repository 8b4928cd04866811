use crate::Error;

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// A positive, finite `f64` parameter: band width in standard deviations
/// or ATRs, or a Parabolic SAR step.
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Multiplier(f64);

impl Multiplier {
    /// Creates a new multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, NaN, or infinite.
    #[must_use]
    pub fn new(value: f64) -> Self {
        match Self::try_new(value) {
            Ok(multiplier) => multiplier,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new multiplier, rejecting zero, negative, NaN, and infinite
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMultiplier`] for rejected values.
    pub fn try_new(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidMultiplier(value))
        }
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Multiplier {}

impl Hash for Multiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
