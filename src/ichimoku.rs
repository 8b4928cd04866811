use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PrimaryValue,
    dc::RangeWindow,
};

/// Configuration for the [`Ichimoku`] cloud.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct IchimokuConfig {
    tenkan_length: usize,
    kijun_length: usize,
    senkou_b_length: usize,
}

impl IndicatorConfig for IchimokuConfig {
    type Builder = IchimokuConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        IchimokuConfigBuilder::new()
    }
}

impl IchimokuConfig {
    /// Conversion line lookback.
    #[inline]
    #[must_use]
    pub fn tenkan_length(&self) -> usize {
        self.tenkan_length
    }

    /// Base line lookback.
    #[inline]
    #[must_use]
    pub fn kijun_length(&self) -> usize {
        self.kijun_length
    }

    #[inline]
    #[must_use]
    pub fn senkou_b_length(&self) -> usize {
        self.senkou_b_length
    }
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for IchimokuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IchimokuConfig({}, {}, {})",
            self.tenkan_length, self.kijun_length, self.senkou_b_length
        )
    }
}

/// Builder for [`IchimokuConfig`]. Defaults: 9, 26, 52.
pub struct IchimokuConfigBuilder {
    tenkan_length: usize,
    kijun_length: usize,
    senkou_b_length: usize,
}

impl IchimokuConfigBuilder {
    fn new() -> Self {
        Self {
            tenkan_length: 9,
            kijun_length: 26,
            senkou_b_length: 52,
        }
    }

    #[inline]
    #[must_use]
    pub fn tenkan_length(mut self, length: NonZero<usize>) -> Self {
        self.tenkan_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn kijun_length(mut self, length: NonZero<usize>) -> Self {
        self.kijun_length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn senkou_b_length(mut self, length: NonZero<usize>) -> Self {
        self.senkou_b_length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<IchimokuConfig> for IchimokuConfigBuilder {
    #[inline]
    fn build(self) -> IchimokuConfig {
        IchimokuConfig {
            tenkan_length: self.tenkan_length,
            kijun_length: self.kijun_length,
            senkou_b_length: self.senkou_b_length,
        }
    }
}

/// Ichimoku output. No line is shifted in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IchimokuValue {
    tenkan: Price,
    kijun: Price,
    senkou_a: Price,
    senkou_b: Price,
    chikou: Price,
}

impl IchimokuValue {
    #[inline]
    #[must_use]
    pub fn tenkan(&self) -> Price {
        self.tenkan
    }

    #[inline]
    #[must_use]
    pub fn kijun(&self) -> Price {
        self.kijun
    }

    /// Midpoint of tenkan and kijun.
    #[inline]
    #[must_use]
    pub fn senkou_a(&self) -> Price {
        self.senkou_a
    }

    #[inline]
    #[must_use]
    pub fn senkou_b(&self) -> Price {
        self.senkou_b
    }

    /// The current close.
    #[inline]
    #[must_use]
    pub fn chikou(&self) -> Price {
        self.chikou
    }
}

impl PrimaryValue for IchimokuValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.tenkan
    }
}

impl Display for IchimokuValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku(tenkan: {}, kijun: {}, senkou_a: {}, senkou_b: {}, chikou: {})",
            self.tenkan, self.kijun, self.senkou_a, self.senkou_b, self.chikou
        )
    }
}

/// Ichimoku Kinko Hyo.
///
/// Tenkan, kijun and senkou B are midpoints of the high/low range over
/// their respective lookbacks. Senkou A averages tenkan and kijun; chikou
/// is the close. Senkou lines are reported on the bar that produced them
/// rather than displaced forward, and chikou is not displaced back. Shift
/// them by the kijun length when plotting a classic cloud.
#[derive(Clone, Debug)]
pub struct Ichimoku {
    config: IchimokuConfig,
    tenkan: RangeWindow,
    kijun: RangeWindow,
    senkou_b: RangeWindow,
    current: Option<IchimokuValue>,
}

impl Indicator for Ichimoku {
    type Config = IchimokuConfig;
    type Output = IchimokuValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            tenkan: RangeWindow::new(config.tenkan_length),
            kijun: RangeWindow::new(config.kijun_length),
            senkou_b: RangeWindow::new(config.senkou_b_length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> IchimokuValue {
        let tenkan = self.tenkan.push_midpoint(ohlcv);
        let kijun = self.kijun.push_midpoint(ohlcv);
        let senkou_b = self.senkou_b.push_midpoint(ohlcv);

        let value = IchimokuValue {
            tenkan,
            kijun,
            senkou_a: (tenkan + kijun) / 2.0,
            senkou_b,
            chikou: ohlcv.close(),
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<IchimokuValue> {
        self.current
    }
}

impl Display for Ichimoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku({}, {}, {})",
            self.config.tenkan_length, self.config.kijun_length, self.config.senkou_b_length
        )
    }
}
