use crate::{Ohlcv, Price, math};

use std::fmt::{Debug, Display};

/// Price source extracted from an [`Ohlcv`] bar before feeding into an
/// indicator.
///
/// Source-aware indicators (moving averages, RSI, MACD, ROC, TRIX,
/// Bollinger Bands) are configured with a `PriceSource` that determines
/// which value (or derived value) to compute on.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
    /// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
    ///
    /// On the first bar (no previous close), falls back to `high - low`.
    TrueRange,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv, prev_close: Option<Price>) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Close => ohlcv.close(),
            Self::Low => ohlcv.low(),
            Self::HL2 => (ohlcv.high() + ohlcv.low()) / 2.0,
            Self::HLC3 => math::typical_price(ohlcv),
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
            Self::HLCC4 => (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / 4.0,
            Self::TrueRange => match prev_close {
                Some(prev_close) => math::true_range(ohlcv.high(), ohlcv.low(), prev_close),
                None => ohlcv.high() - ohlcv.low(),
            },
        }
    }
}

/// Extracts a [`PriceSource`] bar after bar, remembering the previous close
/// for [`PriceSource::TrueRange`].
#[derive(Clone, Debug)]
pub(crate) struct SourceReader {
    source: PriceSource,
    prev_close: Option<Price>,
}

impl SourceReader {
    pub(crate) fn new(source: PriceSource) -> Self {
        Self {
            source,
            prev_close: None,
        }
    }

    #[inline]
    pub(crate) fn read(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.source.extract(ohlcv, self.prev_close);
        self.prev_close = Some(ohlcv.close());
        price
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{Bar, assert_approx};

    // o=12 h=40 l=8 c=24
    fn wide_bar() -> Bar {
        Bar::new(12.0, 40.0, 8.0, 24.0)
    }

    mod single_fields {
        use super::*;

        #[test]
        fn reads_the_named_field() {
            let b = wide_bar();
            let cases = [
                (PriceSource::Open, 12.0),
                (PriceSource::High, 40.0),
                (PriceSource::Low, 8.0),
                (PriceSource::Close, 24.0),
            ];
            for (source, expected) in cases {
                assert_eq!(source.extract(&b, None), expected, "{source}");
            }
        }

        #[test]
        fn close_is_the_default() {
            assert_eq!(PriceSource::default(), PriceSource::Close);
        }
    }

    mod composites {
        use super::*;

        #[test]
        fn median_price() {
            assert_eq!(PriceSource::HL2.extract(&wide_bar(), None), 24.0);
        }

        #[test]
        fn typical_price_matches_math_helper() {
            let b = wide_bar();
            assert_approx!(PriceSource::HLC3.extract(&b, None), 72.0 / 3.0);
            assert_eq!(PriceSource::HLC3.extract(&b, None), math::typical_price(&b));
        }

        #[test]
        fn four_price_averages() {
            // (12 + 40 + 8 + 24) / 4 = 21, (40 + 8 + 24 + 24) / 4 = 24
            assert_eq!(PriceSource::OHLC4.extract(&wide_bar(), None), 21.0);
            assert_eq!(PriceSource::HLCC4.extract(&wide_bar(), None), 24.0);
        }
    }

    mod true_range {
        use super::*;

        #[test]
        fn first_bar_uses_its_own_range() {
            assert_eq!(PriceSource::TrueRange.extract(&wide_bar(), None), 32.0);
        }

        #[test]
        fn previous_close_inside_range_keeps_range() {
            assert_eq!(PriceSource::TrueRange.extract(&wide_bar(), Some(20.0)), 32.0);
        }

        #[test]
        fn gaps_extend_the_range() {
            // gap down into the bar: 40 - 0
            assert_eq!(PriceSource::TrueRange.extract(&wide_bar(), Some(0.0)), 40.0);
            // gap up above it: 60 - 8
            assert_eq!(PriceSource::TrueRange.extract(&wide_bar(), Some(60.0)), 52.0);
        }
    }

    mod reader {
        use super::*;

        #[test]
        fn remembers_previous_close() {
            let mut reader = SourceReader::new(PriceSource::TrueRange);
            // first bar: 15 - 5
            assert_eq!(reader.read(&Bar::new(10.0, 15.0, 5.0, 10.0)), 10.0);
            // gap up: 30 - 10
            assert_eq!(reader.read(&Bar::new(25.0, 30.0, 20.0, 28.0)), 20.0);
        }

        #[test]
        fn plain_source_ignores_history() {
            let mut reader = SourceReader::new(PriceSource::Close);
            assert_eq!(reader.read(&wide_bar()), 24.0);
            assert_eq!(reader.read(&wide_bar()), 24.0);
        }
    }
}
