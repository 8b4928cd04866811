use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PrimaryValue, math};

/// Configuration for the Average Directional Index ([`Adx`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AdxConfig {
    length: usize,
}

impl IndicatorConfig for AdxConfig {
    type Builder = AdxConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AdxConfigBuilder::new()
    }
}

impl AdxConfig {
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

impl Default for AdxConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for AdxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdxConfig({})", self.length)
    }
}

/// Builder for [`AdxConfig`]. Default length: 14.
pub struct AdxConfigBuilder {
    length: usize,
}

impl AdxConfigBuilder {
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

impl IndicatorConfigBuilder<AdxConfig> for AdxConfigBuilder {
    #[inline]
    fn build(self) -> AdxConfig {
        AdxConfig {
            length: self.length,
        }
    }
}

/// ADX output: trend strength plus the directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdxValue {
    adx: f64,
    plus_di: f64,
    minus_di: f64,
    dx: f64,
}

impl AdxValue {
    /// Wilder-smoothed DX.
    #[inline]
    #[must_use]
    pub fn adx(&self) -> f64 {
        self.adx
    }

    /// +DI: smoothed upward movement as a percentage of smoothed true range.
    #[inline]
    #[must_use]
    pub fn plus_di(&self) -> f64 {
        self.plus_di
    }

    /// −DI: smoothed downward movement as a percentage of smoothed true range.
    #[inline]
    #[must_use]
    pub fn minus_di(&self) -> f64 {
        self.minus_di
    }

    /// Unsmoothed directional index of this bar.
    #[inline]
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }
}

impl PrimaryValue for AdxValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.adx
    }
}

impl Display for AdxValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ADX(adx: {}, +di: {}, -di: {})",
            self.adx, self.plus_di, self.minus_di
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct PrevBar {
    high: Price,
    low: Price,
    close: Price,
}

/// Average Directional Index (ADX) with +DI and −DI.
///
/// ```text
/// +DM = high − prev_high   if it exceeds prev_low − low and is positive
/// −DM = prev_low − low     if it exceeds high − prev_high and is positive
/// S   = S − S / n + raw    (Wilder sum of +DM, −DM and TR)
/// ±DI = S(±DM) / S(TR) × 100
/// DX  = |+DI − −DI| / (+DI + −DI) × 100
/// ADX = (prev_ADX × (n − 1) + DX) / n
/// ```
///
/// The smoothed sums are seeded at bar `length` with the plain sum of the
/// first `length` raw values, and ADX is seeded with that bar's DX. All
/// lines are 0 before bar `length`.
#[derive(Clone, Debug)]
pub struct Adx {
    config: AdxConfig,
    prev: Option<PrevBar>,
    seen_bars: usize,
    plus_dm: f64,
    minus_dm: f64,
    true_range: f64,
    adx: f64,
    current: Option<AdxValue>,
}

impl Indicator for Adx {
    type Config = AdxConfig;
    type Output = AdxValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prev: None,
            seen_bars: 0,
            plus_dm: 0.0,
            minus_dm: 0.0,
            true_range: 0.0,
            adx: 0.0,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> AdxValue {
        let index = self.seen_bars;
        self.seen_bars += 1;

        let bar = PrevBar {
            high: ohlcv.high(),
            low: ohlcv.low(),
            close: ohlcv.close(),
        };
        let value = match self.prev.replace(bar) {
            None => AdxValue::default(),
            Some(prev) => self.advance(index, prev, bar),
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<AdxValue> {
        self.current
    }
}

impl Adx {
    fn advance(&mut self, index: usize, prev: PrevBar, bar: PrevBar) -> AdxValue {
        let length = self.config.length;
        #[allow(clippy::cast_precision_loss)]
        let n = length as f64;

        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        let plus_dm = if up > down && up > 0.0 { up } else { 0.0 };
        let minus_dm = if down > up && down > 0.0 { down } else { 0.0 };
        let true_range = math::true_range(bar.high, bar.low, prev.close);

        if index <= length {
            self.plus_dm += plus_dm;
            self.minus_dm += minus_dm;
            self.true_range += true_range;
            if index < length {
                return AdxValue::default();
            }
        } else {
            self.plus_dm = self.plus_dm - self.plus_dm / n + plus_dm;
            self.minus_dm = self.minus_dm - self.minus_dm / n + minus_dm;
            self.true_range = self.true_range - self.true_range / n + true_range;
        }

        let (plus_di, minus_di) = if self.true_range == 0.0 {
            (0.0, 0.0)
        } else {
            (
                self.plus_dm / self.true_range * 100.0,
                self.minus_dm / self.true_range * 100.0,
            )
        };

        let di_sum = plus_di + minus_di;
        let dx = if di_sum == 0.0 {
            0.0
        } else {
            (plus_di - minus_di).abs() / di_sum * 100.0
        };

        self.adx = if index == length {
            dx
        } else {
            #[allow(clippy::cast_precision_loss)]
            let decay = (length - 1) as f64;
            (self.adx * decay + dx) / n
        };

        AdxValue {
            adx: self.adx,
            plus_di,
            minus_di,
            dx,
        }
    }
}

impl Display for Adx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ADX({})", self.config.length)
    }
}
