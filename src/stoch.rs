use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, PrimaryValue,
    price_window::PriceWindow,
};

const NEUTRAL: f64 = 50.0;

/// Configuration for the Stochastic Oscillator ([`Stoch`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StochConfig {
    k_length: usize,
    d_length: usize,
    smooth_k: usize,
}

impl IndicatorConfig for StochConfig {
    type Builder = StochConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochConfigBuilder::new()
    }
}

impl StochConfig {
    /// Lookback of the high/low range.
    #[inline]
    #[must_use]
    pub fn k_length(&self) -> usize {
        self.k_length
    }

    /// Width of the %D mean over smoothed %K.
    #[inline]
    #[must_use]
    pub fn d_length(&self) -> usize {
        self.d_length
    }

    /// Width of the mean applied to raw %K.
    #[inline]
    #[must_use]
    pub fn smooth_k(&self) -> usize {
        self.smooth_k
    }
}

impl Default for StochConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for StochConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochConfig({}, {}, {})",
            self.k_length, self.d_length, self.smooth_k
        )
    }
}

/// Builder for [`StochConfig`].
///
/// Defaults: %K 14, %D 3, smoothing 3.
pub struct StochConfigBuilder {
    k_length: usize,
    d_length: usize,
    smooth_k: usize,
}

impl StochConfigBuilder {
    fn new() -> Self {
        Self {
            k_length: 14,
            d_length: 3,
            smooth_k: 3,
        }
    }

    #[inline]
    #[must_use]
    pub fn k_length(mut self, length: NonZero<usize>) -> Self {
        self.k_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn d_length(mut self, length: NonZero<usize>) -> Self {
        self.d_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn smooth_k(mut self, length: NonZero<usize>) -> Self {
        self.smooth_k = length.get();
        self
    }
}

impl IndicatorConfigBuilder<StochConfig> for StochConfigBuilder {
    #[inline]
    fn build(self) -> StochConfig {
        StochConfig {
            k_length: self.k_length,
            d_length: self.d_length,
            smooth_k: self.smooth_k,
        }
    }
}

/// Stochastic output: smoothed %K and %D.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochValue {
    k: f64,
    d: f64,
}

impl StochValue {
    /// Smoothed %K.
    #[inline]
    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Mean of smoothed %K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }
}

impl PrimaryValue for StochValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.k
    }
}

impl Display for StochValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stoch(k: {}, d: {})", self.k, self.d)
    }
}

/// Stochastic Oscillator.
///
/// ```text
/// raw %K = (close − lowest_low) / (highest_high − lowest_low) × 100
/// %K     = SMA(raw %K, smooth_k)
/// %D     = SMA(%K, d_length)
/// ```
///
/// Until `k_length` bars have been seen both lines report 50. The raw %K of
/// those bars is also 50 and enters the smoothing windows, so the first
/// real values are blended with the neutral level. A zero high-low range
/// gives a raw %K of 50.
#[derive(Clone, Debug)]
pub struct Stoch {
    config: StochConfig,
    highs: PriceWindow,
    lows: PriceWindow,
    raw_k: PriceWindow,
    smoothed_k: PriceWindow,
    current: Option<StochValue>,
}

impl Indicator for Stoch {
    type Config = StochConfig;
    type Output = StochValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            highs: PriceWindow::new(config.k_length),
            lows: PriceWindow::new(config.k_length),
            raw_k: PriceWindow::new(config.smooth_k),
            smoothed_k: PriceWindow::new(config.d_length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> StochValue {
        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());

        let warming_up = !self.highs.is_full();
        let raw = if warming_up {
            NEUTRAL
        } else {
            let highest = self.highs.highest();
            let lowest = self.lows.lowest();
            let range = highest - lowest;
            if range == 0.0 {
                NEUTRAL
            } else {
                (ohlcv.close() - lowest) / range * 100.0
            }
        };

        self.raw_k.push(raw);
        let k = self.raw_k.mean();
        self.smoothed_k.push(k);
        let d = self.smoothed_k.mean();

        let value = if warming_up {
            StochValue {
                k: NEUTRAL,
                d: NEUTRAL,
            }
        } else {
            StochValue { k, d }
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<StochValue> {
        self.current
    }
}

impl Display for Stoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stoch({}, {}, {})",
            self.config.k_length, self.config.d_length, self.config.smooth_k
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, hlc, nz};

    fn stoch(k: usize, d: usize, smooth: usize) -> Stoch {
        Stoch::new(
            StochConfig::builder()
                .k_length(nz(k))
                .d_length(nz(d))
                .smooth_k(nz(smooth))
                .build(),
        )
    }

    #[test]
    fn neutral_during_warm_up() {
        let mut stoch = stoch(3, 1, 1);
        let first = stoch.compute(&hlc(10.0, 5.0, 9.0));
        let second = stoch.compute(&hlc(12.0, 6.0, 7.0));
        assert_eq!((first.k(), first.d()), (50.0, 50.0));
        assert_eq!((second.k(), second.d()), (50.0, 50.0));
    }

    #[test]
    fn unsmoothed_k_is_position_in_range() {
        let mut stoch = stoch(2, 1, 1);
        stoch.compute(&hlc(10.0, 0.0, 5.0));
        // range 0..20, close 15 → 75
        let value = stoch.compute(&hlc(20.0, 5.0, 15.0));
        assert_eq!(value.k(), 75.0);
        assert_eq!(value.d(), 75.0);
    }

    #[test]
    fn warm_up_raw_k_enters_smoothing() {
        let mut stoch = stoch(2, 1, 2);
        stoch.compute(&hlc(10.0, 0.0, 5.0)); // raw 50
        // raw 100, smoothed (50 + 100) / 2
        let value = stoch.compute(&hlc(20.0, 5.0, 20.0));
        assert_eq!(value.k(), 75.0);
    }

    #[test]
    fn d_averages_smoothed_k() {
        let mut stoch = stoch(1, 2, 1);
        stoch.compute(&hlc(10.0, 0.0, 10.0)); // k = 100
        let value = stoch.compute(&hlc(10.0, 0.0, 0.0)); // k = 0
        assert_eq!(value.k(), 0.0);
        assert_eq!(value.d(), 50.0);
    }

    #[test]
    fn flat_range_is_neutral() {
        let mut stoch = stoch(2, 1, 1);
        stoch.compute(&bar(10.0));
        assert_eq!(stoch.compute(&bar(10.0)).k(), 50.0);
    }

    #[test]
    fn stays_within_bounds() {
        let mut stoch = Stoch::new(StochConfig::default());
        for i in 0..60 {
            let c = 100.0 + f64::from(i % 7) * 3.0 - f64::from(i % 3) * 4.0;
            let value = stoch.compute(&hlc(c + 2.0, c - 2.0, c));
            assert!((0.0..=100.0).contains(&value.k()));
            assert!((0.0..=100.0).contains(&value.d()));
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            Stoch::new(StochConfig::default()).to_string(),
            "Stoch(14, 3, 3)"
        );
    }
}
