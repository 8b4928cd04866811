use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    nonzero, price_source::SourceReader,
};

/// Configuration for the Double Exponential Moving Average ([`Dema`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DemaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for DemaConfig {
    type Builder = DemaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        DemaConfigBuilder::new()
    }
}

impl DemaConfig {
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

    /// DEMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for DemaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for DemaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DemaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`DemaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct DemaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl DemaConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
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

impl IndicatorConfigBuilder<DemaConfig> for DemaConfigBuilder {
    #[inline]
    fn build(self) -> DemaConfig {
        DemaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Double Exponential Moving Average (DEMA).
///
/// ```text
/// DEMA = 2 × EMA(price) − EMA(EMA(price))
/// ```
#[derive(Clone, Debug)]
pub struct Dema {
    config: DemaConfig,
    reader: SourceReader,
    ema1: Ema,
    ema2: Ema,
    current: Option<Price>,
}

impl Indicator for Dema {
    type Config = DemaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let ema = EmaConfig::close(nonzero(config.length));

        Self {
            config,
            reader: SourceReader::new(config.source),
            ema1: Ema::new(ema),
            ema2: Ema::new(ema),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.reader.read(ohlcv);

        let v1 = self.ema1.update(price);
        let v2 = self.ema2.update(v1);
        let value = 2.0 * v1 - v2;

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Dema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DEMA({}, {})", self.config.length, self.config.source)
    }
}
