use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Bb, BbConfig, Dc, DcConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Kc, KcConfig,
    Multiplier, Ohlcv, PrimaryValue, nonzero,
};

/// Configuration for the [`Squeeze`] momentum indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SqueezeConfig {
    length: usize,
    bb_multiplier: Multiplier,
    kc_multiplier: Multiplier,
}

impl IndicatorConfig for SqueezeConfig {
    type Builder = SqueezeConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SqueezeConfigBuilder::new()
    }
}

impl SqueezeConfig {
    /// Shared lookback of the Bollinger, Keltner and Donchian components.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn bb_multiplier(&self) -> Multiplier {
        self.bb_multiplier
    }

    #[inline]
    #[must_use]
    pub fn kc_multiplier(&self) -> Multiplier {
        self.kc_multiplier
    }
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for SqueezeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SqueezeConfig({}, {}, {})",
            self.length, self.bb_multiplier, self.kc_multiplier
        )
    }
}

/// Builder for [`SqueezeConfig`].
///
/// Defaults: length 20, Bollinger 2.0σ, Keltner 1.5 ATR.
pub struct SqueezeConfigBuilder {
    length: usize,
    bb_multiplier: Multiplier,
    kc_multiplier: Multiplier,
}

impl SqueezeConfigBuilder {
    fn new() -> Self {
        Self {
            length: 20,
            bb_multiplier: Multiplier::new(2.0),
            kc_multiplier: Multiplier::new(1.5),
        }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn bb_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.bb_multiplier = multiplier;
        self
    }

    #[inline]
    #[must_use]
    pub fn kc_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.kc_multiplier = multiplier;
        self
    }
}

impl IndicatorConfigBuilder<SqueezeConfig> for SqueezeConfigBuilder {
    #[inline]
    fn build(self) -> SqueezeConfig {
        SqueezeConfig {
            length: self.length,
            bb_multiplier: self.bb_multiplier,
            kc_multiplier: self.kc_multiplier,
        }
    }
}

/// Squeeze output: momentum plus the compression flags.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqueezeValue {
    momentum: f64,
    squeeze_on: bool,
    squeeze_off: bool,
}

impl SqueezeValue {
    /// Close minus the average of the Donchian midpoint and the SMA.
    #[inline]
    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Bollinger Bands sit strictly inside the Keltner Channels.
    #[inline]
    #[must_use]
    pub fn squeeze_on(&self) -> bool {
        self.squeeze_on
    }

    /// Bollinger Bands extend beyond the Keltner Channels on both sides.
    #[inline]
    #[must_use]
    pub fn squeeze_off(&self) -> bool {
        self.squeeze_off
    }
}

impl PrimaryValue for SqueezeValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.momentum
    }
}

impl Display for SqueezeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Squeeze(momentum: {}, on: {}, off: {})",
            self.momentum, self.squeeze_on, self.squeeze_off
        )
    }
}

/// Squeeze Momentum.
///
/// Compares Bollinger Bands with Keltner Channels over the same lookback
/// (Keltner uses that lookback for both its EMA and ATR). The squeeze is on
/// when volatility compresses the Bollinger Bands inside the Keltner
/// Channels and off when they break out on both sides. A bar can be neither.
///
/// Momentum is a simplified deviation of the close from the mean of the
/// Donchian midpoint and the SMA, not a least-squares regression:
///
/// ```text
/// momentum = close − (donchian_middle + sma) / 2
/// ```
#[derive(Clone, Debug)]
pub struct Squeeze {
    config: SqueezeConfig,
    bb: Bb,
    kc: Kc,
    dc: Dc,
    current: Option<SqueezeValue>,
}

impl Indicator for Squeeze {
    type Config = SqueezeConfig;
    type Output = SqueezeValue;

    fn new(config: Self::Config) -> Self {
        let length = nonzero(config.length);

        Self {
            config,
            bb: Bb::new(
                BbConfig::builder()
                    .length(length)
                    .multiplier(config.bb_multiplier)
                    .build(),
            ),
            kc: Kc::new(
                KcConfig::builder()
                    .ema_length(length)
                    .atr_length(length)
                    .multiplier(config.kc_multiplier)
                    .build(),
            ),
            dc: Dc::new(DcConfig::new(length)),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> SqueezeValue {
        let bb = self.bb.compute(ohlcv);
        let kc = self.kc.compute(ohlcv);
        let dc = self.dc.compute(ohlcv);

        let value = SqueezeValue {
            momentum: ohlcv.close() - (dc.middle() + bb.middle()) / 2.0,
            squeeze_on: bb.lower() > kc.lower() && bb.upper() < kc.upper(),
            squeeze_off: bb.lower() < kc.lower() && bb.upper() > kc.upper(),
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<SqueezeValue> {
        self.current
    }
}

impl Display for Squeeze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Squeeze({}, {}, {})",
            self.config.length, self.config.bb_multiplier, self.config.kc_multiplier
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, hlc, nz};

    fn squeeze(length: usize) -> Squeeze {
        Squeeze::new(SqueezeConfig::builder().length(nz(length)).build())
    }

    #[test]
    fn flat_market_is_neither_on_nor_off() {
        // All bands collapse onto the price: no strict inequality holds.
        let mut squeeze = squeeze(3);
        for _ in 0..5 {
            let value = squeeze.compute(&bar(10.0));
            assert!(!value.squeeze_on());
            assert!(!value.squeeze_off());
            assert_eq!(value.momentum(), 0.0);
        }
    }

    #[test]
    fn wide_ranges_with_still_closes_squeeze_on() {
        // Closes never move (σ = 0) but bars have a range (ATR > 0).
        let mut squeeze = squeeze(3);
        let value = squeeze.compute(&hlc(12.0, 8.0, 10.0));
        assert!(value.squeeze_on());
        assert!(!value.squeeze_off());
    }

    #[test]
    fn volatile_closes_on_narrow_bars_squeeze_off() {
        // Range-less bars whose closes jump: 2σ outgrows 1.5 ATR.
        let mut squeeze = squeeze(3);
        squeeze.compute(&bar(10.0));
        let value = squeeze.compute(&bar(20.0));
        assert!(value.squeeze_off());
        assert!(!value.squeeze_on());
    }

    #[test]
    fn momentum_measures_close_against_midpoints() {
        // Single bar: Donchian mid 10, SMA 11 → 11 − 10.5
        let value = squeeze(3).compute(&hlc(12.0, 8.0, 11.0));
        assert_eq!(value.momentum(), 0.5);
    }

    #[test]
    fn display() {
        assert_eq!(
            Squeeze::new(SqueezeConfig::default()).to_string(),
            "Squeeze(20, 2, 1.5)"
        );
    }
}
