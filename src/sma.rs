use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_source::SourceReader, price_window::PriceWindow,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use quantdash_ta::SmaConfig;
/// use std::num::NonZero;
///
/// let config = SmaConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }
}

impl SmaConfig {
    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Price source extracted from each bar.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// SMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// SMA on median price: `(high + low) / 2`.
    #[must_use]
    pub fn hl2(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }

    /// SMA on typical price: `(high + low + close) / 3`.
    #[must_use]
    pub fn hlc3(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::HLC3)
            .build()
    }
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct SmaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
        }
    }

    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn build(self) -> SmaConfig {
        SmaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured window length. Until *n* bars have been seen the mean is taken
/// over the available prefix, so the first value equals the first price.
///
/// O(n) per bar: the window is summed oldest to newest on every update.
///
/// # Example
///
/// ```rust
/// use quantdash_ta::{Bar, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
/// let bar = |c: f64| Bar::new("", c, c, c, c, 0.0);
///
/// assert_eq!(sma.compute(&bar(10.0)), 10.0);
/// assert_eq!(sma.compute(&bar(20.0)), 15.0);
/// assert_eq!(sma.compute(&bar(30.0)), 20.0);
/// assert_eq!(sma.compute(&bar(40.0)), 30.0);
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    reader: SourceReader,
    window: PriceWindow,
    current: Option<Price>,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            window: PriceWindow::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Price {
        let price = self.reader.read(bar);
        self.update(price)
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Sma {
    /// Advances the average with a raw value instead of a bar.
    ///
    /// Lets the SMA run over any derived series (another indicator's output,
    /// spreads, ratios) without wrapping it in a bar.
    #[inline]
    pub fn update(&mut self, price: Price) -> Price {
        self.window.push(price);

        let mean = self.window.mean();
        self.current = Some(mean);
        mean
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{Bar, assert_approx, bar, bars, nz};

    fn sma(length: usize) -> Sma {
        Sma::new(SmaConfig::close(nz(length)))
    }

    mod warm_up {
        use super::*;

        #[test]
        fn first_value_is_first_price() {
            let mut sma = sma(5);
            assert_eq!(sma.compute(&bar(42.0)), 42.0);
        }

        #[test]
        fn averages_available_prefix() {
            let mut sma = sma(3);
            sma.compute(&bar(10.0));
            assert_eq!(sma.compute(&bar(20.0)), 15.0);
        }

        #[test]
        fn full_window_average() {
            let mut sma = sma(3);
            sma.compute(&bar(10.0));
            sma.compute(&bar(20.0));
            assert_eq!(sma.compute(&bar(30.0)), 20.0);
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn drops_oldest_on_advance() {
            let mut sma = sma(2);
            sma.compute(&bar(10.0));
            sma.compute(&bar(20.0));
            // (20 + 30) / 2 = 25
            assert_eq!(sma.compute(&bar(30.0)), 25.0);
        }

        #[test]
        fn slides_across_many_bars() {
            let mut sma = sma(2);
            for close in [10.0, 20.0, 30.0, 40.0] {
                sma.compute(&bar(close));
            }
            // (40 + 50) / 2 = 45
            assert_eq!(sma.compute(&bar(50.0)), 45.0);
        }

        #[test]
        fn constant_window_after_varied_prices_is_exact() {
            let mut sma = sma(3);
            let mut value = 0.0;
            for close in [101.37, 99.13, 100.07, 0.25, 0.25, 0.25] {
                value = sma.compute(&bar(close));
            }
            assert_eq!(value, 0.25);
        }

        #[test]
        fn matches_mean_of_current_window() {
            let mut sma = sma(3);
            let mut value = 0.0;
            for close in [101.37, 99.13, 100.07, 0.1, 0.1, 0.1] {
                value = sma.compute(&bar(close));
            }
            assert_eq!(value, crate::math::mean(&[0.1, 0.1, 0.1]));
        }

        #[test]
        fn evicted_outlier_leaves_no_residue() {
            let mut sma = sma(2);
            sma.compute(&bar(1e17));
            sma.compute(&bar(1.0));
            assert_eq!(sma.compute(&bar(1.0)), 1.0);
        }
    }

    mod price_source {
        use super::*;

        #[test]
        fn hl2_source() {
            let mut sma = Sma::new(SmaConfig::hl2(nz(2)));
            sma.compute(&Bar::new(0.0, 20.0, 10.0, 0.0)); // HL2 = 15
            let result = sma.compute(&Bar::new(0.0, 30.0, 20.0, 0.0)); // HL2 = 25
            assert_eq!(result, 20.0);
        }

        #[test]
        fn hlc3_source() {
            let mut sma = Sma::new(SmaConfig::hlc3(nz(1)));
            let result = sma.compute(&Bar::new(0.0, 30.0, 5.0, 20.0));
            assert_approx!(result, 55.0 / 3.0);
        }

        #[test]
        fn true_range_source() {
            let mut sma = Sma::new(
                SmaConfig::builder()
                    .length(nz(2))
                    .source(PriceSource::TrueRange)
                    .build(),
            );
            sma.compute(&Bar::new(10.0, 20.0, 5.0, 15.0)); // TR=15
            // TR2: hl=10, |22-15|=7, |12-15|=3 → 10
            assert_eq!(sma.compute(&Bar::new(16.0, 22.0, 12.0, 18.0)), 12.5);
        }
    }

    mod raw_values {
        use super::*;

        #[test]
        fn update_bypasses_source() {
            let mut sma = sma(2);
            sma.update(1.0);
            assert_eq!(sma.update(3.0), 2.0);
            assert_eq!(sma.value(), Some(2.0));
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn one_point_per_bar() {
            let input = bars(&[1.0, 2.0, 3.0, 4.0]);
            let points = Sma::batch(SmaConfig::close(nz(2)), &input);
            let values: Vec<f64> = points.iter().map(|p| p.value).collect();
            assert_eq!(values, vec![1.0, 1.5, 2.5, 3.5]);
            assert_eq!(points[3].date, "d3");
        }

        #[test]
        fn empty_input_gives_empty_output() {
            let input: Vec<Bar> = Vec::new();
            assert!(Sma::batch(SmaConfig::default(), &input).is_empty());
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(sma(20).to_string(), "SMA(20, Close)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut sma = sma(3);
            sma.compute(&bar(10.0));
            sma.compute(&bar(20.0));

            let mut cloned = sma.clone();

            assert_eq!(sma.compute(&bar(30.0)), 20.0);
            assert_eq!(cloned.value(), Some(15.0));
            assert_eq!(cloned.compute(&bar(90.0)), 40.0);
        }
    }

    mod config {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn default_is_twenty_on_close() {
            let config = SmaConfig::default();
            assert_eq!(config.length(), 20);
            assert_eq!(config.source(), PriceSource::Close);
        }

        #[test]
        fn hl2_helper_uses_hl2_source() {
            assert_eq!(SmaConfig::hl2(nz(10)).source(), PriceSource::HL2);
        }

        #[test]
        fn display_config() {
            assert_eq!(
                SmaConfig::close(nz(20)).to_string(),
                "SmaConfig(20, Close)"
            );
        }

        #[test]
        fn eq_and_hash() {
            let mut set = HashSet::new();
            set.insert(SmaConfig::close(nz(20)));

            assert!(set.contains(&SmaConfig::close(nz(20))));
            assert!(!set.contains(&SmaConfig::close(nz(10))));
        }
    }

    mod value_accessor {
        use super::*;

        #[test]
        fn none_before_first_bar() {
            assert_eq!(sma(3).value(), None);
        }

        #[test]
        fn matches_last_compute() {
            let mut sma = sma(2);
            sma.compute(&bar(10.0));
            let computed = sma.compute(&bar(20.0));
            assert_eq!(sma.value(), Some(computed));
        }
    }
}
