use crate::{Ohlcv, Point, PrimaryValue};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use tracing::trace;

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (lengths, price source, multipliers). Configs are value types: cheap to
/// copy, compare, and hash. [`Default`] yields the conventional parameters
/// (RSI 14, MACD 12/26/9, ...), which are also the builder defaults.
pub trait IndicatorConfig:
    Sized + Copy + Default + PartialEq + Eq + Hash + Display + Debug
{
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder preloaded with the default parameters.
    fn builder() -> Self::Builder;
}

/// Builder for an [`IndicatorConfig`].
///
/// Every field has a default, so `build` never fails.
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Builds the config.
    #[must_use]
    fn build(self) -> Config;
}

/// A technical indicator over an ordered OHLCV sequence.
///
/// Indicators are explicit accumulators: each call to
/// [`compute`](Indicator::compute) advances the state by one bar and returns
/// that bar's value. Every bar produces a value: during warm-up the
/// indicator averages over the available prefix or reports its documented
/// neutral value (e.g. 50 for RSI, 0 for ADX), so series are fully populated
/// from the first bar.
///
/// [`batch`](Indicator::batch) runs a fresh indicator over a slice and returns
/// one [`Point`] per bar. Because batch is a fold of `compute`, the values for
/// `bars[..n]` are always a prefix of the values for `bars[..n + 1]`.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Indicator, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let bars = vec![
///     Bar::new("2024-01-01", 10.0, 10.0, 10.0, 10.0, 0.0),
///     Bar::new("2024-01-02", 20.0, 20.0, 20.0, 20.0, 0.0),
///     Bar::new("2024-01-03", 30.0, 30.0, 30.0, 30.0, 0.0),
/// ];
///
/// let sma = Sma::batch(SmaConfig::close(NonZero::new(2).unwrap()), &bars);
///
/// // Shrinking window at the start, full window afterwards.
/// assert_eq!(sma[0].value, 10.0);
/// assert_eq!(sma[1].value, 15.0);
/// assert_eq!(sma[2].value, 25.0);
/// assert_eq!(sma[2].date, "2024-01-03");
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for single-line indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug + PrimaryValue;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns its indicator value.
    fn compute(&mut self, bar: &impl Ohlcv) -> Self::Output;

    /// Returns the last computed value without advancing state,
    /// or `None` before the first bar.
    ///
    /// This is a cached field read: O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;

    /// Computes the indicator over `bars`, returning one date-aligned
    /// [`Point`] per bar. Empty input yields an empty result.
    fn batch<B: Ohlcv>(config: Self::Config, bars: &[B]) -> Vec<Point<Self::Output>> {
        let mut indicator = Self::new(config);
        trace!(indicator = %indicator, bars = bars.len(), "computing series");

        bars.iter()
            .map(|bar| Point::new(bar.date(), indicator.compute(bar)))
            .collect()
    }
}
