use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, price_window::PriceWindow,
};

/// Configuration for the Chaikin Money Flow ([`Cmf`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CmfConfig {
    length: usize,
}

impl IndicatorConfig for CmfConfig {
    type Builder = CmfConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        CmfConfigBuilder::new()
    }
}

impl CmfConfig {
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

impl Default for CmfConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for CmfConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CmfConfig({})", self.length)
    }
}

/// Builder for [`CmfConfig`]. Default length: 20.
pub struct CmfConfigBuilder {
    length: usize,
}

impl CmfConfigBuilder {
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

impl IndicatorConfigBuilder<CmfConfig> for CmfConfigBuilder {
    #[inline]
    fn build(self) -> CmfConfig {
        CmfConfig {
            length: self.length,
        }
    }
}

/// Chaikin Money Flow (CMF).
///
/// ```text
/// MFM = ((close − low) − (high − close)) / (high − low)    0 when high == low
/// CMF = Σ(MFM × volume) / Σ volume                         0 when Σ volume == 0
/// ```
///
/// Sums run over the last `length` bars, fewer at the start of the series.
#[derive(Clone, Debug)]
pub struct Cmf {
    config: CmfConfig,
    flow_volume: PriceWindow,
    volume: PriceWindow,
    current: Option<f64>,
}

impl Indicator for Cmf {
    type Config = CmfConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            flow_volume: PriceWindow::new(config.length),
            volume: PriceWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let (high, low, close) = (ohlcv.high(), ohlcv.low(), ohlcv.close());
        let range = high - low;
        let flow_volume = if range == 0.0 {
            0.0
        } else {
            ((close - low) - (high - close)) / range * ohlcv.volume()
        };

        self.flow_volume.push(flow_volume);
        self.volume.push(ohlcv.volume());

        let volume = self.volume.sum();
        let value = if volume == 0.0 {
            0.0
        } else {
            self.flow_volume.sum() / volume
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Cmf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CMF({})", self.config.length)
    }
}
