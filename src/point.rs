use std::fmt::Display;

/// One indicator result, aligned with the input bar it was computed from.
///
/// Batch computations return exactly one `Point` per input bar, in input
/// order, with `date` copied from the bar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<V> {
    pub date: String,
    pub value: V,
}

impl<V> Point<V> {
    #[must_use]
    pub fn new(date: impl Into<String>, value: V) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

impl<V: PrimaryValue> Point<V> {
    /// The primary line of this point, see [`PrimaryValue`].
    #[inline]
    #[must_use]
    pub fn primary(&self) -> f64 {
        self.value.primary()
    }
}

impl<V: Display> Display for Point<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.date, self.value)
    }
}

/// The single line an indicator is plotted as by default.
///
/// Single-value indicators return the value itself. Multi-line indicators
/// return their headline line (MACD line, middle band, ADX, ...) and expose
/// the others through accessor methods.
pub trait PrimaryValue {
    fn primary(&self) -> f64;
}

impl PrimaryValue for f64 {
    #[inline]
    fn primary(&self) -> f64 {
        *self
    }
}
