use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Atr, AtrConfig, Direction, Indicator, IndicatorConfig, IndicatorConfigBuilder, Multiplier,
    Ohlcv, Price, PrimaryValue, nonzero,
};

/// Configuration for the [`Supertrend`] trailing stop.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SupertrendConfig {
    length: usize,
    multiplier: Multiplier,
}

impl IndicatorConfig for SupertrendConfig {
    type Builder = SupertrendConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SupertrendConfigBuilder::new()
    }
}

impl SupertrendConfig {
    /// ATR lookback.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Band offset in ATRs.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }
}

impl Default for SupertrendConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for SupertrendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SupertrendConfig({}, {})", self.length, self.multiplier)
    }
}

/// Builder for [`SupertrendConfig`]. Defaults: length 10, multiplier 3.0.
pub struct SupertrendConfigBuilder {
    length: usize,
    multiplier: Multiplier,
}

impl SupertrendConfigBuilder {
    fn new() -> Self {
        Self {
            length: 10,
            multiplier: Multiplier::new(3.0),
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
    pub fn multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl IndicatorConfigBuilder<SupertrendConfig> for SupertrendConfigBuilder {
    #[inline]
    fn build(self) -> SupertrendConfig {
        SupertrendConfig {
            length: self.length,
            multiplier: self.multiplier,
        }
    }
}

/// Supertrend output: the active stop plus both final bands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupertrendValue {
    value: Price,
    direction: Direction,
    upper: Price,
    lower: Price,
}

impl SupertrendValue {
    /// Final lower band in an uptrend, final upper band in a downtrend.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Price {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }
}

impl PrimaryValue for SupertrendValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.value
    }
}

impl Display for SupertrendValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Supertrend({}, {})", self.value, self.direction)
    }
}

#[derive(Clone, Copy, Debug)]
struct FinalBands {
    upper: Price,
    lower: Price,
    close: Price,
}

/// Supertrend.
///
/// ```text
/// basic_upper = hl2 + k × ATR
/// basic_lower = hl2 − k × ATR
/// ```
///
/// The final upper band only moves down, unless the previous close broke
/// above it; the final lower band only moves up, unless the previous close
/// broke below it. The trend starts up, turns down when the close falls
/// under the final lower band and turns back up when the close rises over
/// the final upper band.
#[derive(Clone, Debug)]
pub struct Supertrend {
    config: SupertrendConfig,
    atr: Atr,
    bands: Option<FinalBands>,
    direction: Direction,
    current: Option<SupertrendValue>,
}

impl Indicator for Supertrend {
    type Config = SupertrendConfig;
    type Output = SupertrendValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            atr: Atr::new(AtrConfig::new(nonzero(config.length))),
            bands: None,
            direction: Direction::Up,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> SupertrendValue {
        let atr = self.atr.compute(ohlcv);
        let hl2 = (ohlcv.high() + ohlcv.low()) / 2.0;
        let offset = self.config.multiplier.value() * atr;
        let (basic_upper, basic_lower) = (hl2 + offset, hl2 - offset);

        let (upper, lower) = match self.bands {
            None => (basic_upper, basic_lower),
            Some(prev) => (
                if basic_upper < prev.upper || prev.close > prev.upper {
                    basic_upper
                } else {
                    prev.upper
                },
                if basic_lower > prev.lower || prev.close < prev.lower {
                    basic_lower
                } else {
                    prev.lower
                },
            ),
        };

        let close = ohlcv.close();
        self.direction = match self.direction {
            Direction::Up if close < lower => Direction::Down,
            Direction::Down if close > upper => Direction::Up,
            unchanged => unchanged,
        };
        self.bands = Some(FinalBands {
            upper,
            lower,
            close,
        });

        let value = SupertrendValue {
            value: if self.direction.is_up() { lower } else { upper },
            direction: self.direction,
            upper,
            lower,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<SupertrendValue> {
        self.current
    }
}

impl Display for Supertrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Supertrend({}, {})",
            self.config.length, self.config.multiplier
        )
    }
}
