use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, math,
    price_window::PriceWindow,
};

/// Configuration for the Money Flow Index ([`Mfi`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MfiConfig {
    length: usize,
}

impl IndicatorConfig for MfiConfig {
    type Builder = MfiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MfiConfigBuilder::new()
    }
}

impl MfiConfig {
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

impl Default for MfiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for MfiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MfiConfig({})", self.length)
    }
}

/// Builder for [`MfiConfig`]. Default length: 14.
pub struct MfiConfigBuilder {
    length: usize,
}

impl MfiConfigBuilder {
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

impl IndicatorConfigBuilder<MfiConfig> for MfiConfigBuilder {
    #[inline]
    fn build(self) -> MfiConfig {
        MfiConfig {
            length: self.length,
        }
    }
}

/// Money Flow Index (MFI), a volume-weighted RSI.
///
/// Raw money flow is `typical_price × volume`. It counts as positive when the
/// typical price rose from the previous bar and negative when it fell. Over
/// the last `length` flows:
///
/// ```text
/// MFI = 100 − 100 / (1 + Σ positive / Σ negative)
/// ```
///
/// The first `length` bars read 50. A window without negative flow reads 100.
#[derive(Clone, Debug)]
pub struct Mfi {
    config: MfiConfig,
    seen_bars: usize,
    prev_typical: Option<Price>,
    positive: PriceWindow,
    negative: PriceWindow,
    current: Option<f64>,
}

impl Mfi {
    const NEUTRAL: f64 = 50.0;
}

impl Indicator for Mfi {
    type Config = MfiConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            seen_bars: 0,
            prev_typical: None,
            positive: PriceWindow::new(config.length),
            negative: PriceWindow::new(config.length),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        let typical = math::typical_price(ohlcv);
        if let Some(prev) = self.prev_typical.replace(typical) {
            let flow = typical * ohlcv.volume();
            self.positive.push(if typical > prev { flow } else { 0.0 });
            self.negative.push(if typical < prev { flow } else { 0.0 });
        }
        self.seen_bars += 1;

        let negative = self.negative.sum();
        let value = if self.seen_bars <= self.config.length {
            Self::NEUTRAL
        } else if negative == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + self.positive.sum() / negative)
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Mfi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MFI({})", self.config.length)
    }
}
