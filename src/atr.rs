use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, math};

/// Configuration for the Average True Range ([`Atr`]) indicator.
///
/// # Example
///
/// ```
/// use quantdash_ta::AtrConfig;
/// use std::num::NonZero;
///
/// let config = AtrConfig::new(NonZero::new(10).unwrap());
/// assert_eq!(config.length(), 10);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AtrConfig {
    length: usize,
}

impl IndicatorConfig for AtrConfig {
    type Builder = AtrConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AtrConfigBuilder::new()
    }
}

impl AtrConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for AtrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtrConfig({})", self.length)
    }
}

/// Builder for [`AtrConfig`]. Default length: 14.
pub struct AtrConfigBuilder {
    length: usize,
}

impl AtrConfigBuilder {
    fn new() -> Self {
        Self { length: 14 }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<AtrConfig> for AtrConfigBuilder {
    #[inline]
    fn build(self) -> AtrConfig {
        AtrConfig {
            length: self.length,
        }
    }
}

/// Average True Range (ATR) with Wilder smoothing.
///
/// ```text
/// TR  = max(high − low, |high − prev_close|, |low − prev_close|)
/// ATR = (prev_ATR × (n − 1) + TR) / n
/// ```
///
/// The first bar's true range is `high − low`. For the first `length` bars
/// the ATR is the mean of the true ranges seen so far.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Atr, AtrConfig, Bar};
/// use std::num::NonZero;
///
/// let mut atr = Atr::new(AtrConfig::new(NonZero::new(2).unwrap()));
///
/// assert_eq!(atr.compute(&Bar::new("", 10.0, 12.0, 8.0, 10.0, 0.0)), 4.0);
/// // Gap up: TR = |16 − 10| = 6, mean (4 + 6) / 2
/// assert_eq!(atr.compute(&Bar::new("", 15.0, 16.0, 14.0, 15.0, 0.0)), 5.0);
/// // Wilder: (5 × 1 + 2) / 2
/// assert_eq!(atr.compute(&Bar::new("", 15.0, 16.0, 14.0, 15.0, 0.0)), 3.5);
/// ```
#[derive(Clone, Debug)]
pub struct Atr {
    config: AtrConfig,
    prev_close: Option<Price>,
    seen_bars: usize,
    range_sum: Price,
    current: Option<Price>,
}

impl Indicator for Atr {
    type Config = AtrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prev_close: None,
            seen_bars: 0,
            range_sum: 0.0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let (high, low) = (ohlcv.high(), ohlcv.low());
        let true_range = match self.prev_close.replace(ohlcv.close()) {
            Some(prev_close) => math::true_range(high, low, prev_close),
            None => high - low,
        };

        let length = self.config.length;
        let value = match self.current {
            Some(previous) if self.seen_bars >= length => {
                #[allow(clippy::cast_precision_loss)]
                let (decay, n) = ((length - 1) as f64, length as f64);
                (previous * decay + true_range) / n
            }
            _ => {
                self.range_sum += true_range;
                self.seen_bars += 1;
                #[allow(clippy::cast_precision_loss)]
                let seen = self.seen_bars as f64;
                self.range_sum / seen
            }
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.config.length)
    }
}
