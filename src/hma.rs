use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Wma, WmaConfig,
    nonzero, price_source::SourceReader,
};

/// Configuration for the Hull Moving Average ([`Hma`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct HmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for HmaConfig {
    type Builder = HmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        HmaConfigBuilder::new()
    }
}

impl HmaConfig {
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

    /// Length of the fast inner WMA: `max(⌊length / 2⌋, 1)`.
    #[must_use]
    pub fn half_length(&self) -> usize {
        (self.length / 2).max(1)
    }

    /// Length of the outer smoothing WMA: `max(⌊√length⌋, 1)`.
    #[must_use]
    pub fn root_length(&self) -> usize {
        self.length.isqrt().max(1)
    }

    /// HMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for HmaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for HmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`HmaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct HmaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl HmaConfigBuilder {
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

impl IndicatorConfigBuilder<HmaConfig> for HmaConfigBuilder {
    #[inline]
    fn build(self) -> HmaConfig {
        HmaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Hull Moving Average (HMA).
///
/// ```text
/// HMA = WMA(2 × WMA(price, n/2) − WMA(price, n), √n)
/// ```
///
/// The difference term extrapolates the trend and the outer WMA smooths it,
/// giving a low-lag average. The three inner WMAs are fed raw values, so
/// their pass-through warm-up carries into the HMA.
#[derive(Clone, Debug)]
pub struct Hma {
    config: HmaConfig,
    reader: SourceReader,
    half: Wma,
    full: Wma,
    root: Wma,
    current: Option<Price>,
}

impl Indicator for Hma {
    type Config = HmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            half: Wma::new(WmaConfig::close(nonzero(config.half_length()))),
            full: Wma::new(WmaConfig::close(nonzero(config.length))),
            root: Wma::new(WmaConfig::close(nonzero(config.root_length()))),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.reader.read(ohlcv);

        let fast = self.half.update(price);
        let slow = self.full.update(price);
        let value = self.root.update(2.0 * fast - slow);

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Hma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HMA({}, {})", self.config.length, self.config.source)
    }
}
