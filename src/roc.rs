use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, PriceSource,
    price_source::SourceReader, price_window::PriceWindow,
};

/// Configuration for the Rate of Change ([`Roc`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RocConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RocConfig {
    type Builder = RocConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RocConfigBuilder::new()
    }
}

impl RocConfig {
    /// Number of bars between the compared prices.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// ROC on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for RocConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for RocConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RocConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RocConfig`].
///
/// Defaults: length = 12, source = [`PriceSource::Close`].
pub struct RocConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl RocConfigBuilder {
    fn new() -> Self {
        Self {
            length: 12,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<RocConfig> for RocConfigBuilder {
    #[inline]
    fn build(self) -> RocConfig {
        RocConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Rate of Change (ROC), in percent.
///
/// ```text
/// ROC = (price − price[n bars ago]) / price[n bars ago] × 100
/// ```
///
/// 0 for the first `length` bars and when the older price is 0.
#[derive(Clone, Debug)]
pub struct Roc {
    config: RocConfig,
    reader: SourceReader,
    window: PriceWindow,
    current: Option<f64>,
}

impl Indicator for Roc {
    type Config = RocConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            window: PriceWindow::new(config.length + 1),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let price = self.reader.read(ohlcv);
        self.window.push(price);

        let value = match self.window.oldest() {
            Some(prior) if self.window.is_full() && prior != 0.0 => {
                (price - prior) / prior * 100.0
            }
            _ => 0.0,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Roc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ROC({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, nz};

    fn roc(length: usize) -> Roc {
        Roc::new(RocConfig::close(nz(length)))
    }

    #[test]
    fn zero_during_warm_up() {
        let mut roc = roc(2);
        assert_eq!(roc.compute(&bar(100.0)), 0.0);
        assert_eq!(roc.compute(&bar(150.0)), 0.0);
    }

    #[test]
    fn compares_with_price_length_bars_ago() {
        let mut roc = roc(2);
        roc.compute(&bar(100.0));
        roc.compute(&bar(150.0));
        assert_eq!(roc.compute(&bar(110.0)), 10.0);
        // 150 → 75
        assert_eq!(roc.compute(&bar(75.0)), -50.0);
    }

    #[test]
    fn zero_prior_price_is_zero() {
        let mut roc = roc(1);
        roc.compute(&bar(0.0));
        assert_eq!(roc.compute(&bar(5.0)), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Roc::new(RocConfig::default()).to_string(), "ROC(12, Close)");
    }
}
