use std::fmt::{Debug, Display};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price};

/// On-Balance Volume takes no parameters; the config is its own builder.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct ObvConfig;

impl IndicatorConfig for ObvConfig {
    type Builder = Self;

    #[inline]
    fn builder() -> Self::Builder {
        Self
    }
}

impl IndicatorConfigBuilder<ObvConfig> for ObvConfig {
    #[inline]
    fn build(self) -> ObvConfig {
        self
    }
}

impl Display for ObvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObvConfig")
    }
}

/// On-Balance Volume (OBV).
///
/// Starts at the first bar's volume, then adds the volume of every up-close
/// bar and subtracts the volume of every down-close bar. Unchanged closes
/// leave the total alone.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Obv, ObvConfig};
///
/// let mut obv = Obv::new(ObvConfig);
///
/// assert_eq!(obv.compute(&Bar::new("", 10.0, 10.0, 10.0, 10.0, 100.0)), 100.0);
/// assert_eq!(obv.compute(&Bar::new("", 10.0, 11.0, 10.0, 11.0, 40.0)), 140.0);
/// assert_eq!(obv.compute(&Bar::new("", 11.0, 11.0, 9.0, 9.0, 70.0)), 70.0);
/// ```
#[derive(Clone, Debug)]
pub struct Obv {
    prev_close: Option<Price>,
    total: f64,
    current: Option<f64>,
}

impl Indicator for Obv {
    type Config = ObvConfig;
    type Output = f64;

    fn new(_config: Self::Config) -> Self {
        Self {
            prev_close: None,
            total: 0.0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let (close, volume) = (ohlcv.close(), ohlcv.volume());

        match self.prev_close.replace(close) {
            None => self.total = volume,
            Some(prev) if close > prev => self.total += volume,
            Some(prev) if close < prev => self.total -= volume,
            Some(_) => {}
        }

        self.current = Some(self.total);
        self.total
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Obv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OBV")
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::bar;

    fn obv() -> Obv {
        Obv::new(ObvConfig)
    }

    #[test]
    fn seeds_with_first_volume() {
        assert_eq!(obv().compute(&bar(10.0).vol(500.0)), 500.0);
    }

    #[test]
    fn unchanged_close_keeps_total() {
        let mut obv = obv();
        obv.compute(&bar(10.0).vol(500.0));
        assert_eq!(obv.compute(&bar(10.0).vol(300.0)), 500.0);
    }

    #[test]
    fn follows_close_direction() {
        let mut obv = obv();
        obv.compute(&bar(10.0).vol(100.0));
        assert_eq!(obv.compute(&bar(12.0).vol(50.0)), 150.0);
        assert_eq!(obv.compute(&bar(11.0).vol(200.0)), -50.0);
    }

    #[test]
    fn display() {
        assert_eq!(obv().to_string(), "OBV");
        assert_eq!(ObvConfig::default().to_string(), "ObvConfig");
    }
}
