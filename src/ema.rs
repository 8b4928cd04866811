use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_source::SourceReader,
};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use quantdash_ta::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder, PriceSource};
/// use std::num::NonZero;
///
/// let config = EmaConfig::builder()
///     .length(NonZero::new(9).unwrap())
///     .source(PriceSource::HL2)
///     .build();
///
/// assert_eq!(config.length(), 9);
/// assert_eq!(config.source(), PriceSource::HL2);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }
}

impl EmaConfig {
    /// Window length (number of bars).
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

    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// EMA on median price: `(high + low) / 2`.
    #[must_use]
    pub fn hl2(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }

    /// EMA on average price: `(open + high + low + close) / 4`.
    #[must_use]
    pub fn ohlc4(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::OHLC4)
            .build()
    }
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: length = 20, source = [`PriceSource::Close`].
pub struct EmaConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
        }
    }

    /// Sets the indicator window length.
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

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn build(self) -> EmaConfig {
        EmaConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`. Each value is computed as:
///
/// ```text
/// EMA = (price − prev_EMA) × α + prev_EMA
/// ```
///
/// For the first `length` bars the EMA is the mean of the prices seen
/// so far, so bar `length − 1` carries exactly the SMA seed. From then on
/// the recurrence runs in O(1) constant memory.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Ema, EmaConfig};
/// use std::num::NonZero;
///
/// let mut ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
/// let bar = |c: f64| Bar::new("", c, c, c, c, 0.0);
///
/// // Seeding phase: prefix mean
/// assert_eq!(ema.compute(&bar(2.0)), 2.0);
/// assert_eq!(ema.compute(&bar(4.0)), 3.0);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.compute(&bar(6.0)), 4.0);
///
/// // EMA(3) α = 0.5: (8 − 4) × 0.5 + 4 = 6.0
/// assert_eq!(ema.compute(&bar(8.0)), 6.0);
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    reader: SourceReader,
    alpha: f64,
    seen_bars: usize,
    seed_sum: Price,
    current: Option<Price>,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (config.length + 1) as f64,
            seen_bars: 0,
            seed_sum: 0.0,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.reader.read(ohlcv);
        self.update(price)
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Ema {
    /// Advances the average with a raw value instead of a bar.
    ///
    /// Used to smooth derived series: the MACD signal line, the inner
    /// stages of DEMA, TEMA and TRIX, the Force Index.
    #[inline]
    pub fn update(&mut self, price: Price) -> Price {
        let next = match self.current {
            Some(previous) if self.seen_bars >= self.config.length => {
                (price - previous) * self.alpha + previous
            }
            _ => {
                self.seed_sum += price;
                self.seen_bars += 1;
                #[allow(clippy::cast_precision_loss)]
                let seen = self.seen_bars as f64;
                self.seed_sum / seen
            }
        };

        self.current = Some(next);
        next
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}
