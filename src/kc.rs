use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Atr, AtrConfig, Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Multiplier,
    Ohlcv, Price, PrimaryValue, nonzero,
};

/// Configuration for Keltner Channels ([`Kc`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct KcConfig {
    ema_length: usize,
    atr_length: usize,
    multiplier: Multiplier,
}

impl IndicatorConfig for KcConfig {
    type Builder = KcConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        KcConfigBuilder::new()
    }
}

impl KcConfig {
    /// Length of the close EMA forming the middle line.
    #[inline]
    #[must_use]
    pub fn ema_length(&self) -> usize {
        self.ema_length
    }

    #[inline]
    #[must_use]
    pub fn atr_length(&self) -> usize {
        self.atr_length
    }

    /// Band offset in ATRs.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }
}

impl Default for KcConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for KcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KcConfig({}, {}, {})",
            self.ema_length, self.atr_length, self.multiplier
        )
    }
}

/// Builder for [`KcConfig`].
///
/// Defaults: EMA 20, ATR 10, multiplier 2.0.
pub struct KcConfigBuilder {
    ema_length: usize,
    atr_length: usize,
    multiplier: Multiplier,
}

impl KcConfigBuilder {
    fn new() -> Self {
        Self {
            ema_length: 20,
            atr_length: 10,
            multiplier: Multiplier::new(2.0),
        }
    }

    #[inline]
    #[must_use]
    pub fn ema_length(mut self, length: NonZero<usize>) -> Self {
        self.ema_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn atr_length(mut self, length: NonZero<usize>) -> Self {
        self.atr_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl IndicatorConfigBuilder<KcConfig> for KcConfigBuilder {
    #[inline]
    fn build(self) -> KcConfig {
        KcConfig {
            ema_length: self.ema_length,
            atr_length: self.atr_length,
            multiplier: self.multiplier,
        }
    }
}

/// Keltner Channels output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KcValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl KcValue {
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// EMA of close.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }
}

impl PrimaryValue for KcValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.middle
    }
}

impl Display for KcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KC(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Keltner Channels (KC).
///
/// ```text
/// middle = EMA(close, ema_length)
/// upper  = middle + k × ATR(atr_length)
/// lower  = middle − k × ATR(atr_length)
/// ```
#[derive(Clone, Debug)]
pub struct Kc {
    config: KcConfig,
    ema: Ema,
    atr: Atr,
    current: Option<KcValue>,
}

impl Indicator for Kc {
    type Config = KcConfig;
    type Output = KcValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            ema: Ema::new(EmaConfig::close(nonzero(config.ema_length))),
            atr: Atr::new(AtrConfig::new(nonzero(config.atr_length))),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> KcValue {
        let middle = self.ema.compute(ohlcv);
        let atr = self.atr.compute(ohlcv);
        let offset = self.config.multiplier.value() * atr;

        let value = KcValue {
            upper: middle + offset,
            middle,
            lower: middle - offset,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<KcValue> {
        self.current
    }
}

impl Display for Kc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KC({}, {}, {})",
            self.config.ema_length, self.config.atr_length, self.config.multiplier
        )
    }
}
