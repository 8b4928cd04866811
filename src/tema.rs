use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    nonzero, price_source::SourceReader,
};

/// Configuration for the Triple Exponential Moving Average ([`Tema`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TemaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for TemaConfig {
    type Builder = TemaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TemaConfigBuilder::new()
    }
}

impl TemaConfig {
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

    /// TEMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for TemaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for TemaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TemaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`TemaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct TemaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl TemaConfigBuilder {
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

impl IndicatorConfigBuilder<TemaConfig> for TemaConfigBuilder {
    #[inline]
    fn build(self) -> TemaConfig {
        TemaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Triple Exponential Moving Average (TEMA).
///
/// ```text
/// TEMA = 3 × EMA − 3 × EMA(EMA) + EMA(EMA(EMA))
/// ```
#[derive(Clone, Debug)]
pub struct Tema {
    config: TemaConfig,
    reader: SourceReader,
    ema1: Ema,
    ema2: Ema,
    ema3: Ema,
    current: Option<Price>,
}

impl Indicator for Tema {
    type Config = TemaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let ema = EmaConfig::close(nonzero(config.length));

        Self {
            config,
            reader: SourceReader::new(config.source),
            ema1: Ema::new(ema),
            ema2: Ema::new(ema),
            ema3: Ema::new(ema),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.reader.read(ohlcv);

        let v1 = self.ema1.update(price);
        let v2 = self.ema2.update(v1);
        let v3 = self.ema3.update(v2);
        let value = 3.0 * v1 - 3.0 * v2 + v3;

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Tema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TEMA({}, {})", self.config.length, self.config.source)
    }
}
