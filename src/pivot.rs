use std::fmt::{Debug, Display};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PrimaryValue};

/// Classic floor pivots take no parameters; the config is its own builder.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct PivotConfig;

impl IndicatorConfig for PivotConfig {
    type Builder = Self;

    #[inline]
    fn builder() -> Self::Builder {
        Self
    }
}

impl IndicatorConfigBuilder<PivotConfig> for PivotConfig {
    #[inline]
    fn build(self) -> PivotConfig {
        self
    }
}

impl Display for PivotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PivotConfig")
    }
}

/// Pivot level plus three resistances and three supports.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotValue {
    pivot: Price,
    r1: Price,
    r2: Price,
    r3: Price,
    s1: Price,
    s2: Price,
    s3: Price,
}

impl PivotValue {
    fn from_bar(high: Price, low: Price, close: Price) -> Self {
        let pivot = (high + low + close) / 3.0;
        Self {
            pivot,
            r1: 2.0 * pivot - low,
            r2: pivot + (high - low),
            r3: high + 2.0 * (pivot - low),
            s1: 2.0 * pivot - high,
            s2: pivot - (high - low),
            s3: low - 2.0 * (high - pivot),
        }
    }

    #[inline]
    #[must_use]
    pub fn pivot(&self) -> Price {
        self.pivot
    }

    #[inline]
    #[must_use]
    pub fn r1(&self) -> Price {
        self.r1
    }

    #[inline]
    #[must_use]
    pub fn r2(&self) -> Price {
        self.r2
    }

    #[inline]
    #[must_use]
    pub fn r3(&self) -> Price {
        self.r3
    }

    #[inline]
    #[must_use]
    pub fn s1(&self) -> Price {
        self.s1
    }

    #[inline]
    #[must_use]
    pub fn s2(&self) -> Price {
        self.s2
    }

    #[inline]
    #[must_use]
    pub fn s3(&self) -> Price {
        self.s3
    }
}

impl PrimaryValue for PivotValue {
    #[inline]
    fn primary(&self) -> f64 {
        self.pivot
    }
}

impl Display for PivotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pivot(p: {}, r: [{}, {}, {}], s: [{}, {}, {}])",
            self.pivot, self.r1, self.r2, self.r3, self.s1, self.s2, self.s3
        )
    }
}

/// Classic floor-trader pivot points.
///
/// Each bar's levels come from the previous bar's high, low and close; the
/// first bar uses its own.
///
/// ```text
/// P  = (H + L + C) / 3
/// R1 = 2P − L            S1 = 2P − H
/// R2 = P + (H − L)       S2 = P − (H − L)
/// R3 = H + 2(P − L)      S3 = L − 2(H − P)
/// ```
#[derive(Clone, Debug)]
pub struct Pivot {
    prev: Option<PivotValue>,
    current: Option<PivotValue>,
}

impl Indicator for Pivot {
    type Config = PivotConfig;
    type Output = PivotValue;

    fn new(_config: Self::Config) -> Self {
        Self {
            prev: None,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> PivotValue {
        let levels = PivotValue::from_bar(ohlcv.high(), ohlcv.low(), ohlcv.close());
        let value = self.prev.replace(levels).unwrap_or(levels);

        self.current = Some(value);
        value
    }

    #[inline]
    fn value(&self) -> Option<PivotValue> {
        self.current
    }
}

impl Display for Pivot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pivot")
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::hlc;

    #[test]
    fn first_bar_uses_itself() {
        let value = Pivot::new(PivotConfig).compute(&hlc(12.0, 6.0, 9.0));
        assert_eq!(value.pivot(), 9.0);
        assert_eq!((value.r1(), value.s1()), (12.0, 6.0));
        assert_eq!((value.r2(), value.s2()), (15.0, 3.0));
        assert_eq!((value.r3(), value.s3()), (18.0, 0.0));
    }

    #[test]
    fn later_bars_use_the_previous_one() {
        let mut pivot = Pivot::new(PivotConfig);
        pivot.compute(&hlc(12.0, 6.0, 9.0));
        let value = pivot.compute(&hlc(100.0, 90.0, 95.0));
        assert_eq!(value.pivot(), 9.0);
        let value = pivot.compute(&hlc(1.0, 1.0, 1.0));
        assert_eq!(value.pivot(), 95.0);
    }

    #[test]
    fn levels_are_ordered() {
        let value = Pivot::new(PivotConfig).compute(&hlc(105.0, 98.0, 103.0));
        let levels = [
            value.s3(),
            value.s2(),
            value.s1(),
            value.pivot(),
            value.r1(),
            value.r2(),
            value.r3(),
        ];
        assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
