use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PrimaryValue,
    price_window::PriceWindow,
};

/// Configuration for Donchian Channels ([`Dc`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DcConfig {
    length: usize,
}

impl IndicatorConfig for DcConfig {
    type Builder = DcConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        DcConfigBuilder::new()
    }
}

impl DcConfig {
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

impl Default for DcConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for DcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DcConfig({})", self.length)
    }
}

/// Builder for [`DcConfig`]. Default length: 20.
pub struct DcConfigBuilder {
    length: usize,
}

impl DcConfigBuilder {
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

impl IndicatorConfigBuilder<DcConfig> for DcConfigBuilder {
    #[inline]
    fn build(self) -> DcConfig {
        DcConfig {
            length: self.length,
        }
    }
}

/// Donchian Channels output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DcValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl DcValue {
    /// Highest high of the window.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Midpoint of upper and lower.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lowest low of the window.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }
}

impl PrimaryValue for DcValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.middle
    }
}

impl Display for DcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DC(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Highest high and lowest low over one lookback.
#[derive(Clone, Debug)]
pub(crate) struct RangeWindow {
    highs: PriceWindow,
    lows: PriceWindow,
}

impl RangeWindow {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            highs: PriceWindow::new(length),
            lows: PriceWindow::new(length),
        }
    }

    /// Pushes the bar's high and low, returning `(highest, lowest)`.
    pub(crate) fn push(&mut self, ohlcv: &impl Ohlcv) -> (Price, Price) {
        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());
        (self.highs.highest(), self.lows.lowest())
    }

    /// Pushes the bar and returns the midpoint of the range.
    pub(crate) fn push_midpoint(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let (highest, lowest) = self.push(ohlcv);
        (highest + lowest) / 2.0
    }
}

/// Donchian Channels (DC).
///
/// Upper and lower bands are the highest high and lowest low over the
/// window (shrinking at the start of the series); the middle band is their
/// average.
#[derive(Clone, Debug)]
pub struct Dc {
    config: DcConfig,
    range: RangeWindow,
    current: Option<DcValue>,
}

impl Indicator for Dc {
    type Config = DcConfig;
    type Output = DcValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            range: RangeWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> DcValue {
        let (upper, lower) = self.range.push(ohlcv);
        let value = DcValue {
            upper,
            middle: (upper + lower) / 2.0,
            lower,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<DcValue> {
        self.current
    }
}

impl Display for Dc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DC({})", self.config.length)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{hlc, nz};

    fn dc(length: usize) -> Dc {
        Dc::new(DcConfig::new(nz(length)))
    }

    #[test]
    fn first_bar_spans_its_range() {
        let value = dc(3).compute(&hlc(12.0, 8.0, 10.0));
        assert_eq!((value.upper(), value.middle(), value.lower()), (12.0, 10.0, 8.0));
    }

    #[test]
    fn tracks_extremes_across_window() {
        let mut dc = dc(3);
        dc.compute(&hlc(12.0, 8.0, 10.0));
        dc.compute(&hlc(15.0, 9.0, 14.0));
        let value = dc.compute(&hlc(13.0, 10.0, 11.0));
        assert_eq!((value.upper(), value.lower()), (15.0, 8.0));
    }

    #[test]
    fn extremes_expire() {
        let mut dc = dc(2);
        dc.compute(&hlc(20.0, 1.0, 10.0));
        dc.compute(&hlc(12.0, 8.0, 10.0));
        let value = dc.compute(&hlc(11.0, 9.0, 10.0));
        assert_eq!((value.upper(), value.lower()), (12.0, 8.0));
    }

    #[test]
    fn display() {
        assert_eq!(Dc::new(DcConfig::default()).to_string(), "DC(20)");
    }
}
