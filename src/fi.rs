use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, nonzero,
};

/// Configuration for the Force Index ([`Fi`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct FiConfig {
    length: usize,
}

impl IndicatorConfig for FiConfig {
    type Builder = FiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        FiConfigBuilder::new()
    }
}

impl FiConfig {
    /// EMA smoothing length.
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

impl Default for FiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for FiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FiConfig({})", self.length)
    }
}

/// Builder for [`FiConfig`]. Default length: 13.
pub struct FiConfigBuilder {
    length: usize,
}

impl FiConfigBuilder {
    fn new() -> Self {
        Self { length: 13 }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<FiConfig> for FiConfigBuilder {
    #[inline]
    fn build(self) -> FiConfig {
        FiConfig {
            length: self.length,
        }
    }
}

/// Elder's Force Index: EMA of `(close − prev_close) × volume`.
///
/// The first bar has no previous close and contributes a raw force of 0.
#[derive(Clone, Debug)]
pub struct Fi {
    config: FiConfig,
    ema: Ema,
    prev_close: Option<Price>,
    current: Option<f64>,
}

impl Indicator for Fi {
    type Config = FiConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            ema: Ema::new(EmaConfig::close(nonzero(config.length))),
            prev_close: None,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let close = ohlcv.close();
        let force = self
            .prev_close
            .replace(close)
            .map_or(0.0, |prev| (close - prev) * ohlcv.volume());

        let value = self.ema.update(force);
        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Fi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FI({})", self.config.length)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, nz};

    fn fi(length: usize) -> Fi {
        Fi::new(FiConfig::new(nz(length)))
    }

    #[test]
    fn first_bar_has_no_force() {
        assert_eq!(fi(3).compute(&bar(10.0).vol(1_000.0)), 0.0);
    }

    #[test]
    fn raw_force_at_length_one() {
        let mut fi = fi(1);
        fi.compute(&bar(10.0).vol(100.0));
        assert_eq!(fi.compute(&bar(12.0).vol(50.0)), 100.0);
        assert_eq!(fi.compute(&bar(11.0).vol(30.0)), -30.0);
    }

    #[test]
    fn smooths_with_seeded_ema() {
        let mut fi = fi(2);
        fi.compute(&bar(10.0).vol(10.0)); // raw 0, mean 0
        // raw 20, mean (0 + 20) / 2
        assert_eq!(fi.compute(&bar(12.0).vol(10.0)), 10.0);
        // raw −10, α = 2/3: 10 + (−10 − 10) × 2/3
        let value = fi.compute(&bar(11.0).vol(10.0));
        assert!((value - (10.0 - 40.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(Fi::new(FiConfig::default()).to_string(), "FI(13)");
    }
}
