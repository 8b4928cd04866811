use std::fmt::{Debug, Display};

use crate::{
    Direction, Indicator, IndicatorConfig, IndicatorConfigBuilder, Multiplier, Ohlcv, Price,
    PrimaryValue,
};

/// Configuration for the Parabolic SAR ([`Psar`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct PsarConfig {
    step: Multiplier,
    max: Multiplier,
}

impl IndicatorConfig for PsarConfig {
    type Builder = PsarConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        PsarConfigBuilder::new()
    }
}

impl PsarConfig {
    /// Initial acceleration factor and its increment on every new extreme.
    #[inline]
    #[must_use]
    pub fn step(&self) -> Multiplier {
        self.step
    }

    /// Cap on the acceleration factor.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Multiplier {
        self.max
    }
}

impl Default for PsarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for PsarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PsarConfig({}, {})", self.step, self.max)
    }
}

/// Builder for [`PsarConfig`]. Defaults: step 0.02, max 0.2.
pub struct PsarConfigBuilder {
    step: Multiplier,
    max: Multiplier,
}

impl PsarConfigBuilder {
    fn new() -> Self {
        Self {
            step: Multiplier::new(0.02),
            max: Multiplier::new(0.2),
        }
    }

    #[inline]
    #[must_use]
    pub fn step(mut self, step: Multiplier) -> Self {
        self.step = step;
        self
    }

    #[inline]
    #[must_use]
    pub fn max(mut self, max: Multiplier) -> Self {
        self.max = max;
        self
    }
}

impl IndicatorConfigBuilder<PsarConfig> for PsarConfigBuilder {
    #[inline]
    fn build(self) -> PsarConfig {
        PsarConfig {
            step: self.step,
            max: self.max,
        }
    }
}

/// Parabolic SAR output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsarValue {
    sar: Price,
    direction: Direction,
    extreme_point: Price,
    acceleration: f64,
}

impl PsarValue {
    /// Stop-and-reverse level.
    #[inline]
    #[must_use]
    pub fn sar(&self) -> Price {
        self.sar
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Highest high of an uptrend, lowest low of a downtrend.
    #[inline]
    #[must_use]
    pub fn extreme_point(&self) -> Price {
        self.extreme_point
    }

    #[inline]
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }
}

impl PrimaryValue for PsarValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.sar
    }
}

impl Display for PsarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PSAR({}, {})", self.sar, self.direction)
    }
}

#[derive(Clone, Copy, Debug)]
struct Extremes {
    high: Price,
    low: Price,
}

#[derive(Clone, Copy, Debug)]
struct State {
    direction: Direction,
    sar: Price,
    extreme_point: Price,
    acceleration: f64,
    prev: Extremes,
    prev2: Extremes,
}

/// Parabolic Stop and Reverse (PSAR).
///
/// Starts long with the SAR on the first low and the extreme point on the
/// first high. Each bar the SAR moves `af × (EP − SAR)` toward the extreme
/// point, then is clamped so it never sits inside the previous two bars'
/// range. A new extreme raises `af` by `step` up to `max`; a penetration of
/// the SAR reverses the trend, moves the SAR to the old extreme point and
/// resets `af`.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, Direction, Psar, PsarConfig};
///
/// let mut psar = Psar::new(PsarConfig::default());
///
/// let first = psar.compute(&Bar::new("", 10.0, 11.0, 9.0, 10.0, 0.0));
/// assert_eq!((first.sar(), first.direction()), (9.0, Direction::Up));
///
/// // The low breaks the stop: reversal onto the old extreme point.
/// let second = psar.compute(&Bar::new("", 9.0, 9.5, 7.0, 8.0, 0.0));
/// assert_eq!((second.sar(), second.direction()), (11.0, Direction::Down));
/// ```
#[derive(Clone, Debug)]
pub struct Psar {
    config: PsarConfig,
    state: Option<State>,
    current: Option<PsarValue>,
}

impl Indicator for Psar {
    type Config = PsarConfig;
    type Output = PsarValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: None,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> PsarValue {
        let bar = Extremes {
            high: ohlcv.high(),
            low: ohlcv.low(),
        };
        let step = self.config.step.value();

        let state = match self.state {
            None => State {
                direction: Direction::Up,
                sar: bar.low,
                extreme_point: bar.high,
                acceleration: step,
                prev: bar,
                prev2: bar,
            },
            Some(state) => self.advance(state, bar),
        };
        self.state = Some(state);

        let value = PsarValue {
            sar: state.sar,
            direction: state.direction,
            extreme_point: state.extreme_point,
            acceleration: state.acceleration,
        };

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<PsarValue> {
        self.current
    }
}

impl Psar {
    fn advance(&self, mut state: State, bar: Extremes) -> State {
        let step = self.config.step.value();
        let max = self.config.max.value();

        let mut sar = state.sar + state.acceleration * (state.extreme_point - state.sar);
        match state.direction {
            Direction::Up => {
                sar = sar.min(state.prev.low).min(state.prev2.low);
                if bar.low < sar {
                    state.direction = Direction::Down;
                    sar = state.extreme_point;
                    state.extreme_point = bar.low;
                    state.acceleration = step;
                } else if bar.high > state.extreme_point {
                    state.extreme_point = bar.high;
                    state.acceleration = (state.acceleration + step).min(max);
                }
            }
            Direction::Down => {
                sar = sar.max(state.prev.high).max(state.prev2.high);
                if bar.high > sar {
                    state.direction = Direction::Up;
                    sar = state.extreme_point;
                    state.extreme_point = bar.high;
                    state.acceleration = step;
                } else if bar.low < state.extreme_point {
                    state.extreme_point = bar.low;
                    state.acceleration = (state.acceleration + step).min(max);
                }
            }
        }

        state.sar = sar;
        state.prev2 = state.prev;
        state.prev = bar;
        state
    }
}

impl Display for Psar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PSAR({}, {})", self.config.step, self.config.max)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, hlc};

    fn psar() -> Psar {
        Psar::new(PsarConfig::default())
    }

    #[test]
    fn starts_long_at_first_low() {
        let value = psar().compute(&hlc(11.0, 9.0, 10.0));
        assert_eq!(value.sar(), 9.0);
        assert_eq!(value.extreme_point(), 11.0);
        assert_eq!(value.acceleration(), 0.02);
        assert_eq!(value.direction(), Direction::Up);
    }

    mod acceleration {
        use super::*;

        #[test]
        fn new_high_raises_factor() {
            let mut psar = psar();
            psar.compute(&hlc(11.0, 9.0, 10.0));
            // SAR 9 + 0.02 × 2 = 9.04, clamped by prior low 9 → 9
            let value = psar.compute(&hlc(12.0, 10.0, 11.5));
            assert_eq!(value.sar(), 9.0);
            assert_eq!(value.extreme_point(), 12.0);
            assert_approx!(value.acceleration(), 0.04);
        }

        #[test]
        fn factor_is_capped() {
            let mut psar = psar();
            let mut value = psar.compute(&hlc(11.0, 9.0, 10.0));
            for i in 1..30 {
                let base = 10.0 + f64::from(i);
                value = psar.compute(&hlc(base + 1.0, base - 0.5, base + 0.5));
            }
            assert_eq!(value.direction(), Direction::Up);
            assert_approx!(value.acceleration(), 0.2);
        }
    }

    mod reversal {
        use super::*;

        #[test]
        fn low_under_sar_turns_short() {
            let mut psar = psar();
            psar.compute(&hlc(11.0, 9.0, 10.0));
            let value = psar.compute(&hlc(9.5, 7.0, 8.0));
            assert_eq!(value.direction(), Direction::Down);
            assert_eq!(value.sar(), 11.0);
            assert_eq!(value.extreme_point(), 7.0);
            assert_eq!(value.acceleration(), 0.02);
        }

        #[test]
        fn high_over_sar_turns_long_again() {
            let mut psar = psar();
            psar.compute(&hlc(11.0, 9.0, 10.0));
            psar.compute(&hlc(9.5, 7.0, 8.0));
            // SAR 11 − 0.02 × 4 = 10.92, lifted to prior highs 11 → 11
            let value = psar.compute(&hlc(13.0, 10.0, 12.0));
            assert_eq!(value.direction(), Direction::Up);
            assert_eq!(value.sar(), 7.0);
            assert_eq!(value.extreme_point(), 13.0);
        }
    }

    #[test]
    fn uptrend_sar_stays_below_lows() {
        let mut psar = psar();
        for i in 0..20 {
            let base = 10.0 + f64::from(i);
            let value = psar.compute(&hlc(base + 1.0, base - 1.0, base));
            assert!(value.sar() <= base - 1.0);
        }
    }

    #[test]
    fn display() {
        assert_eq!(psar().to_string(), "PSAR(0.02, 0.2)");
    }
}
