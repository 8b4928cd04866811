use std::fmt::{Debug, Display};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, math};

/// Cumulative VWAP has no parameters; the config is its own builder.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct VwapConfig;

impl IndicatorConfig for VwapConfig {
    type Builder = Self;

    #[inline]
    fn builder() -> Self::Builder {
        Self
    }
}

impl IndicatorConfigBuilder<VwapConfig> for VwapConfig {
    #[inline]
    fn build(self) -> VwapConfig {
        self
    }
}

impl Display for VwapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VwapConfig")
    }
}

/// Volume-Weighted Average Price (VWAP), cumulative from the first bar.
///
/// ```text
/// VWAP = Σ(typical_price × volume) / Σ volume
/// ```
///
/// There is no session reset. While the cumulative volume is zero the bar's
/// typical price is returned.
#[derive(Clone, Debug)]
pub struct Vwap {
    price_volume: f64,
    volume: f64,
    current: Option<Price>,
}

impl Indicator for Vwap {
    type Config = VwapConfig;
    type Output = Price;

    fn new(_config: Self::Config) -> Self {
        Self {
            price_volume: 0.0,
            volume: 0.0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let typical = math::typical_price(ohlcv);
        let volume = ohlcv.volume();
        self.price_volume += typical * volume;
        self.volume += volume;

        let value = if self.volume == 0.0 {
            typical
        } else {
            self.price_volume / self.volume
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Vwap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VWAP")
    }
}
