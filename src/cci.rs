use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, math, price_window::PriceWindow,
};

/// Lambert's constant: scales CCI so that most values fall within ±100.
const LAMBERT: f64 = 0.015;

/// Configuration for the Commodity Channel Index ([`Cci`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CciConfig {
    length: usize,
}

impl IndicatorConfig for CciConfig {
    type Builder = CciConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        CciConfigBuilder::new()
    }
}

impl CciConfig {
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

impl Default for CciConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for CciConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CciConfig({})", self.length)
    }
}

/// Builder for [`CciConfig`]. Default length: 20.
pub struct CciConfigBuilder {
    length: usize,
}

impl CciConfigBuilder {
    fn new() -> Self {
        Self { length: 20 }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<CciConfig> for CciConfigBuilder {
    #[inline]
    fn build(self) -> CciConfig {
        CciConfig {
            length: self.length,
        }
    }
}

/// Commodity Channel Index (CCI).
///
/// ```text
/// CCI = (TP − SMA(TP)) / (0.015 × mean_deviation(TP))
/// ```
///
/// where TP is the typical price. Reports 0 until the window is full and
/// whenever the mean absolute deviation is 0.
#[derive(Clone, Debug)]
pub struct Cci {
    config: CciConfig,
    window: PriceWindow,
    current: Option<f64>,
}

impl Indicator for Cci {
    type Config = CciConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: PriceWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let typical = math::typical_price(ohlcv);
        self.window.push(typical);

        let value = if self.window.is_full() {
            let mean = self.window.mean();
            #[allow(clippy::cast_precision_loss)]
            let deviation = self
                .window
                .iter()
                .fold(0.0, |acc, x| acc + (x - mean).abs())
                / self.window.len() as f64;

            if deviation == 0.0 {
                0.0
            } else {
                (typical - mean) / (LAMBERT * deviation)
            }
        } else {
            0.0
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Cci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CCI({})", self.config.length)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, nz};

    fn cci(length: usize) -> Cci {
        Cci::new(CciConfig::new(nz(length)))
    }

    #[test]
    fn zero_until_window_full() {
        let mut cci = cci(3);
        assert_eq!(cci.compute(&bar(10.0)), 0.0);
        assert_eq!(cci.compute(&bar(20.0)), 0.0);
    }

    #[test]
    fn full_window_value() {
        // TP: 10, 20, 30 → mean 20, mean deviation 20/3
        // (30 − 20) / (0.015 × 20/3) = 100
        let mut cci = cci(3);
        cci.compute(&bar(10.0));
        cci.compute(&bar(20.0));
        let value = cci.compute(&bar(30.0));
        assert!((value - 100.0).abs() < 1e-9, "cci = {value}");
    }

    #[test]
    fn flat_window_is_zero() {
        let mut cci = cci(2);
        cci.compute(&bar(5.0));
        assert_eq!(cci.compute(&bar(5.0)), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(Cci::new(CciConfig::default()).to_string(), "CCI(20)");
    }
}
