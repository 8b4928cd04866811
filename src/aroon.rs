use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, PrimaryValue,
    price_window::PriceWindow,
};

/// Configuration for the [`Aroon`] indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AroonConfig {
    length: usize,
}

impl IndicatorConfig for AroonConfig {
    type Builder = AroonConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AroonConfigBuilder::new()
    }
}

impl AroonConfig {
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

impl Default for AroonConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for AroonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AroonConfig({})", self.length)
    }
}

/// Builder for [`AroonConfig`]. Default length: 25.
pub struct AroonConfigBuilder {
    length: usize,
}

impl AroonConfigBuilder {
    fn new() -> Self {
        Self { length: 25 }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<AroonConfig> for AroonConfigBuilder {
    #[inline]
    fn build(self) -> AroonConfig {
        AroonConfig {
            length: self.length,
        }
    }
}

/// Aroon output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AroonValue {
    up: f64,
    down: f64,
    oscillator: f64,
}

impl AroonValue {
    const NEUTRAL: Self = Self {
        up: 50.0,
        down: 50.0,
        oscillator: 0.0,
    };

    /// Recency of the highest high, 100 when it is the current bar.
    #[inline]
    #[must_use]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Recency of the lowest low, 100 when it is the current bar.
    #[inline]
    #[must_use]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// `up − down`.
    #[inline]
    #[must_use]
    pub fn oscillator(&self) -> f64 {
        self.oscillator
    }
}

impl PrimaryValue for AroonValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.oscillator
    }
}

impl Display for AroonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Aroon(up: {}, down: {}, osc: {})",
            self.up, self.down, self.oscillator
        )
    }
}

/// Aroon.
///
/// Looks back over the current bar plus the `length` before it:
///
/// ```text
/// up   = (length − bars_since_highest_high) / length × 100
/// down = (length − bars_since_lowest_low)  / length × 100
/// ```
///
/// When an extreme repeats, the most recent occurrence counts. Until
/// `length + 1` bars are seen the output is neutral: 50, 50 and 0.
#[derive(Clone, Debug)]
pub struct Aroon {
    config: AroonConfig,
    highs: PriceWindow,
    lows: PriceWindow,
    current: Option<AroonValue>,
}

impl Indicator for Aroon {
    type Config = AroonConfig;
    type Output = AroonValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            highs: PriceWindow::new(config.length + 1),
            lows: PriceWindow::new(config.length + 1),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> AroonValue {
        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());

        let value = if self.highs.is_full() {
            #[allow(clippy::cast_precision_loss)]
            let n = self.config.length as f64;
            #[allow(clippy::cast_precision_loss)]
            let up = self.highs.position_of_highest() as f64 / n * 100.0;
            #[allow(clippy::cast_precision_loss)]
            let down = self.lows.position_of_lowest() as f64 / n * 100.0;

            AroonValue {
                up,
                down,
                oscillator: up - down,
            }
        } else {
            AroonValue::NEUTRAL
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<AroonValue> {
        self.current
    }
}

impl Display for Aroon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aroon({})", self.config.length)
    }
}
