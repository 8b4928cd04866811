use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    PrimaryValue, nonzero, price_source::SourceReader,
};

/// Configuration for the Moving Average Convergence Divergence ([`Macd`])
/// indicator.
///
/// # Example
///
/// ```
/// use quantdash_ta::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig};
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .fast_length(NonZero::new(5).unwrap())
///     .build();
///
/// assert_eq!(config.fast_length(), 5);
/// assert_eq!(config.slow_length(), 26);
/// assert_eq!(config.signal_length(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast_length: usize,
    slow_length: usize,
    signal_length: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }
}

impl MacdConfig {
    #[inline]
    #[must_use]
    pub fn fast_length(&self) -> usize {
        self.fast_length
    }

    #[inline]
    #[must_use]
    pub fn slow_length(&self) -> usize {
        self.slow_length
    }

    #[inline]
    #[must_use]
    pub fn signal_length(&self) -> usize {
        self.signal_length
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// MACD on closing price with the given lengths.
    #[must_use]
    pub fn close(fast: NonZero<usize>, slow: NonZero<usize>, signal: NonZero<usize>) -> Self {
        Self::builder()
            .fast_length(fast)
            .slow_length(slow)
            .signal_length(signal)
            .build()
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast_length, self.slow_length, self.signal_length, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: 12 / 26 / 9 on [`PriceSource::Close`].
pub struct MacdConfigBuilder {
    fast_length: usize,
    slow_length: usize,
    signal_length: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast_length: 12,
            slow_length: 26,
            signal_length: 9,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn fast_length(mut self, length: NonZero<usize>) -> Self {
        self.fast_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn slow_length(mut self, length: NonZero<usize>) -> Self {
        self.slow_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn signal_length(mut self, length: NonZero<usize>) -> Self {
        self.signal_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn build(self) -> MacdConfig {
        MacdConfig {
            fast_length: self.fast_length,
            slow_length: self.slow_length,
            signal_length: self.signal_length,
            source: self.source,
        }
    }
}

/// MACD output: MACD line, signal line and histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdValue {
    /// Fast EMA minus slow EMA.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// MACD line minus signal line.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl PrimaryValue for MacdValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.macd
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(macd: {}, signal: {}, histogram: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// ```text
/// MACD      = EMA(price, fast) − EMA(price, slow)
/// signal    = EMA(MACD, signal)
/// histogram = MACD − signal
/// ```
///
/// All three EMAs follow the [`Ema`] warm-up: prefix means until each has
/// seen its length.
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    reader: SourceReader,
    fast: Ema,
    slow: Ema,
    signal: Ema,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            fast: Ema::new(EmaConfig::close(nonzero(config.fast_length))),
            slow: Ema::new(EmaConfig::close(nonzero(config.slow_length))),
            signal: Ema::new(EmaConfig::close(nonzero(config.signal_length))),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> MacdValue {
        let price = self.reader.read(ohlcv);

        let macd = self.fast.update(price) - self.slow.update(price);
        let signal = self.signal.update(macd);
        let value = MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast_length,
            self.config.slow_length,
            self.config.signal_length,
            self.config.source
        )
    }
}
