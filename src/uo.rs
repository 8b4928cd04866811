use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, math,
    price_window::PriceWindow,
};

const NEUTRAL: f64 = 50.0;

/// Configuration for the Ultimate Oscillator ([`Uo`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct UoConfig {
    short_length: usize,
    medium_length: usize,
    long_length: usize,
}

impl IndicatorConfig for UoConfig {
    type Builder = UoConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        UoConfigBuilder::new()
    }
}

impl UoConfig {
    #[inline]
    #[must_use]
    pub fn short_length(&self) -> usize {
        self.short_length
    }

    #[inline]
    #[must_use]
    pub fn medium_length(&self) -> usize {
        self.medium_length
    }

    /// Longest window; the oscillator is neutral until it fills.
    #[inline]
    #[must_use]
    pub fn long_length(&self) -> usize {
        self.long_length
    }
}

impl Default for UoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for UoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UoConfig({}, {}, {})",
            self.short_length, self.medium_length, self.long_length
        )
    }
}

/// Builder for [`UoConfig`]. Defaults: 7 / 14 / 28.
pub struct UoConfigBuilder {
    short_length: usize,
    medium_length: usize,
    long_length: usize,
}

impl UoConfigBuilder {
    fn new() -> Self {
        Self {
            short_length: 7,
            medium_length: 14,
            long_length: 28,
        }
    }

    #[inline]
    #[must_use]
    pub fn short_length(mut self, length: NonZero<usize>) -> Self {
        self.short_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn medium_length(mut self, length: NonZero<usize>) -> Self {
        self.medium_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn long_length(mut self, length: NonZero<usize>) -> Self {
        self.long_length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<UoConfig> for UoConfigBuilder {
    #[inline]
    fn build(self) -> UoConfig {
        UoConfig {
            short_length: self.short_length,
            medium_length: self.medium_length,
            long_length: self.long_length,
        }
    }
}

/// Buying-pressure and true-range sums over one lookback.
#[derive(Clone, Debug)]
struct PressureWindow {
    pressure: PriceWindow,
    range: PriceWindow,
}

impl PressureWindow {
    fn new(length: usize) -> Self {
        Self {
            pressure: PriceWindow::new(length),
            range: PriceWindow::new(length),
        }
    }

    fn push(&mut self, pressure: Price, range: Price) {
        self.pressure.push(pressure);
        self.range.push(range);
    }

    fn average(&self) -> Option<f64> {
        let range = self.range.sum();
        (range != 0.0).then(|| self.pressure.sum() / range)
    }
}

/// Ultimate Oscillator (Williams).
///
/// ```text
/// BP  = close − min(low, prev_close)
/// TR  = true range
/// avg = Σ BP / Σ TR      (per window)
/// UO  = (4 × avg_short + 2 × avg_medium + avg_long) / 7 × 100
/// ```
///
/// The first bar uses its own close as the previous close. Reports 50
/// until the long window is full and when any true-range sum is zero.
#[derive(Clone, Debug)]
pub struct Uo {
    config: UoConfig,
    short: PressureWindow,
    medium: PressureWindow,
    long: PressureWindow,
    prev_close: Option<Price>,
    seen_bars: usize,
    current: Option<f64>,
}

impl Indicator for Uo {
    type Config = UoConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            short: PressureWindow::new(config.short_length),
            medium: PressureWindow::new(config.medium_length),
            long: PressureWindow::new(config.long_length),
            prev_close: None,
            seen_bars: 0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let close = ohlcv.close();
        let prev_close = self.prev_close.replace(close).unwrap_or(close);

        let pressure = close - ohlcv.low().min(prev_close);
        let range = math::true_range(ohlcv.high(), ohlcv.low(), prev_close);
        self.short.push(pressure, range);
        self.medium.push(pressure, range);
        self.long.push(pressure, range);
        self.seen_bars += 1;

        let value = if self.seen_bars < self.config.long_length {
            NEUTRAL
        } else {
            match (
                self.short.average(),
                self.medium.average(),
                self.long.average(),
            ) {
                (Some(short), Some(medium), Some(long)) => {
                    (4.0 * short + 2.0 * medium + long) / 7.0 * 100.0
                }
                _ => NEUTRAL,
            }
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Uo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UO({}, {}, {})",
            self.config.short_length, self.config.medium_length, self.config.long_length
        )
    }
}
