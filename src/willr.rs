use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, price_window::PriceWindow,
};

const NEUTRAL: f64 = -50.0;

/// Configuration for Williams %R ([`WillR`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WillRConfig {
    length: usize,
}

impl IndicatorConfig for WillRConfig {
    type Builder = WillRConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        WillRConfigBuilder::new()
    }
}

impl WillRConfig {
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

impl Default for WillRConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for WillRConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WillRConfig({})", self.length)
    }
}

/// Builder for [`WillRConfig`]. Default length: 14.
pub struct WillRConfigBuilder {
    length: usize,
}

impl WillRConfigBuilder {
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

impl IndicatorConfigBuilder<WillRConfig> for WillRConfigBuilder {
    #[inline]
    fn build(self) -> WillRConfig {
        WillRConfig {
            length: self.length,
        }
    }
}

/// Williams %R.
///
/// ```text
/// %R = (highest_high − close) / (highest_high − lowest_low) × −100
/// ```
///
/// Ranges from −100 (close at the low) to 0 (close at the high). Reports
/// −50 until the window is full and when the range is zero.
#[derive(Clone, Debug)]
pub struct WillR {
    config: WillRConfig,
    highs: PriceWindow,
    lows: PriceWindow,
    current: Option<f64>,
}

impl Indicator for WillR {
    type Config = WillRConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            highs: PriceWindow::new(config.length),
            lows: PriceWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());

        let value = if self.highs.is_full() {
            let highest = self.highs.highest();
            let range = highest - self.lows.lowest();
            if range == 0.0 {
                NEUTRAL
            } else {
                (highest - ohlcv.close()) / range * -100.0
            }
        } else {
            NEUTRAL
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for WillR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WillR({})", self.config.length)
    }
}
