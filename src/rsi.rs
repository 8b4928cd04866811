use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_source::SourceReader,
};

/// RSI reported before the averages are seeded.
const NEUTRAL: f64 = 50.0;

/// Relative strength assumed when the average loss is zero.
const SATURATED_RS: f64 = 100.0;

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// RSI uses Wilder's smoothing, which has infinite memory: the
/// SMA seed (first `length` price changes) influences all
/// subsequent values.
///
/// # Example
///
/// ```
/// use quantdash_ta::RsiConfig;
/// use std::num::NonZero;
///
/// let config = RsiConfig::close(NonZero::new(14).unwrap());
/// assert_eq!(config.length(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }
}

impl RsiConfig {
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

    /// RSI on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: length = 14, source = [`PriceSource::Close`].
pub struct RsiConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            length: 14,
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

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn build(self) -> RsiConfig {
        RsiConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Relative Strength Index (RSI) with Wilder smoothing.
///
/// Measures the speed and magnitude of price changes on a scale
/// of 0 to 100.
///
/// ```text
/// avg_gain = (prev_avg_gain × (n − 1) + gain) / n
/// avg_loss = (prev_avg_loss × (n − 1) + loss) / n
/// RS       = avg_gain / avg_loss
/// RSI      = 100 − 100 / (1 + RS)
/// ```
///
/// The first `length` bars report a neutral 50 while gains and losses
/// accumulate. Bar `length` seeds both averages with the simple mean of the
/// first `length` changes. When the average loss is zero, RS saturates at
/// 100, giving an RSI just under 100 (≈ 99.01) rather than a division by zero.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Rsi, RsiConfig};
/// use std::num::NonZero;
///
/// let mut rsi = Rsi::new(RsiConfig::close(NonZero::new(3).unwrap()));
/// let bar = |c: f64| Bar::new("", c, c, c, c, 0.0);
///
/// assert_eq!(rsi.compute(&bar(10.0)), 50.0);
/// assert_eq!(rsi.compute(&bar(12.0)), 50.0);
/// assert_eq!(rsi.compute(&bar(11.0)), 50.0);
///
/// // Changes +2, −1, +2: avg_gain = 4/3, avg_loss = 1/3, RS = 4
/// let value = rsi.compute(&bar(13.0));
/// assert!((value - 80.0).abs() < 1e-10);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    reader: SourceReader,
    seen_bars: usize,
    prev_price: Option<Price>,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
    current: Option<f64>,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            reader: SourceReader::new(config.source),
            seen_bars: 0,
            prev_price: None,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let price = self.reader.read(ohlcv);
        let index = self.seen_bars;
        self.seen_bars += 1;

        let value = match self.prev_price.replace(price) {
            None => NEUTRAL,
            Some(prev_price) => self.advance(index, prev_price, price),
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Rsi {
    fn advance(&mut self, index: usize, prev_price: Price, price: Price) -> f64 {
        let length = self.config.length;
        let (gain, loss) = Self::gain_and_loss(prev_price, price);

        #[allow(clippy::cast_precision_loss)]
        let n = length as f64;

        if index < length {
            self.gain_sum += gain;
            self.loss_sum += loss;
            return NEUTRAL;
        }

        if index == length {
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.avg_gain = self.gain_sum / n;
            self.avg_loss = self.loss_sum / n;
        } else {
            #[allow(clippy::cast_precision_loss)]
            let decay = (length - 1) as f64;
            self.avg_gain = (self.avg_gain * decay + gain) / n;
            self.avg_loss = (self.avg_loss * decay + loss) / n;
        }

        Self::rsi_from_averages(self.avg_gain, self.avg_loss)
    }

    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let change = price - prev_price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        let rs = if avg_loss == 0.0 {
            SATURATED_RS
        } else {
            avg_gain / avg_loss
        };

        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}
