use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    nonzero, price_source::SourceReader,
};

/// Configuration for the [`Trix`] indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TrixConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for TrixConfig {
    type Builder = TrixConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TrixConfigBuilder::new()
    }
}

impl TrixConfig {
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

    /// TRIX on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for TrixConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for TrixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrixConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`TrixConfig`].
///
/// Defaults: length = 15, source = [`PriceSource::Close`].
pub struct TrixConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl TrixConfigBuilder {
    fn new() -> Self {
        Self {
            length: 15,
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

impl IndicatorConfigBuilder<TrixConfig> for TrixConfigBuilder {
    #[inline]
    fn build(self) -> TrixConfig {
        TrixConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// TRIX: one-bar rate of change of a triple-smoothed EMA, in basis points.
///
/// ```text
/// E3   = EMA(EMA(EMA(price)))
/// TRIX = (E3 − prev_E3) / prev_E3 × 10000
/// ```
///
/// 0 on the first bar and whenever the previous `E3` is 0.
#[derive(Clone, Debug)]
pub struct Trix {
    config: TrixConfig,
    reader: SourceReader,
    ema1: Ema,
    ema2: Ema,
    ema3: Ema,
    prev_triple: Option<Price>,
    current: Option<f64>,
}

impl Indicator for Trix {
    type Config = TrixConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        let ema = EmaConfig::close(nonzero(config.length));

        Self {
            config,
            reader: SourceReader::new(config.source),
            ema1: Ema::new(ema),
            ema2: Ema::new(ema),
            ema3: Ema::new(ema),
            prev_triple: None,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let price = self.reader.read(ohlcv);
        let triple = self
            .ema3
            .update(self.ema2.update(self.ema1.update(price)));

        let value = match self.prev_triple.replace(triple) {
            Some(prev) if prev != 0.0 => (triple - prev) / prev * 10_000.0,
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

impl Display for Trix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TRIX({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, nz};

    fn trix(length: usize) -> Trix {
        Trix::new(TrixConfig::close(nz(length)))
    }

    #[test]
    fn first_bar_is_zero() {
        assert_eq!(trix(3).compute(&bar(100.0)), 0.0);
    }

    #[test]
    fn length_one_is_plain_rate_of_change() {
        // EMA(1) is the identity, so TRIX is the one-bar change in bp.
        let mut trix = trix(1);
        trix.compute(&bar(100.0));
        assert_eq!(trix.compute(&bar(101.0)), 100.0);
    }

    #[test]
    fn rising_prices_give_positive_trix() {
        let mut trix = trix(3);
        let mut last = 0.0;
        for i in 1..20 {
            last = trix.compute(&bar(f64::from(i) * 10.0));
        }
        assert!(last > 0.0);
    }

    #[test]
    fn zero_previous_value_is_zero() {
        let mut trix = trix(1);
        trix.compute(&bar(0.0));
        assert_eq!(trix.compute(&bar(5.0)), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Trix::new(TrixConfig::default()).to_string(), "TRIX(15, Close)");
    }
}
