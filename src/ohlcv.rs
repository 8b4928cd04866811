use crate::Error;

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Indicators accept `&impl Ohlcv` and extract what they
/// need internally.
///
/// # Ordering
///
/// Indicators index bars by position. Each call to
/// [`Indicator::compute`](crate::Indicator::compute) advances the
/// indicator by exactly one bar, so the sequence must be fed in
/// chronological order without gaps. The [`date`](Ohlcv::date) is an
/// opaque identifier copied into the output, never parsed.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Ohlcv, Price};
///
/// struct MyCandle {
///     day: String,
///     o: f64, h: f64, l: f64, c: f64, v: f64,
/// }
///
/// impl Ohlcv for MyCandle {
///     fn date(&self) -> &str { &self.day }
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> f64 { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Bar identifier, typically an ISO date. Copied verbatim into results.
    fn date(&self) -> &str;

    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// Override this for volume-dependent indicators (OBV, MFI, VWAP, CMF,
    /// Force Index, Volume Profile). Indicators that don't use volume ignore
    /// this value.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// An owned OHLCV bar.
///
/// Convenience implementation of [`Ohlcv`] for callers that don't have their
/// own candle type.
///
/// [`Bar::new`] performs no validation; the indicators tolerate inconsistent
/// bars (their output is then numerically meaningless but never panics).
/// Use [`Bar::try_new`] to reject malformed data at the boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    pub date: String,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl Bar {
    /// Creates a bar without validating it.
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Creates a bar, checking that all values are finite, that
    /// `low ≤ open, close ≤ high`, and that volume is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBar`] naming the first violated constraint.
    pub fn try_new(
        date: impl Into<String>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: f64,
    ) -> Result<Self, Error> {
        let bar = Self::new(date, open, high, low, close, volume);
        bar.validate()?;
        Ok(bar)
    }

    fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: &str| Error::InvalidBar {
            date: self.date.clone(),
            reason: reason.to_owned(),
        };

        if ![self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("non-finite value"));
        }
        if self.low > self.high {
            return Err(invalid("low above high"));
        }
        if self.open < self.low || self.open > self.high {
            return Err(invalid("open outside high-low range"));
        }
        if self.close < self.low || self.close > self.high {
            return Err(invalid("close outside high-low range"));
        }
        if self.volume < 0.0 {
            return Err(invalid("negative volume"));
        }

        Ok(())
    }
}

impl Ohlcv for Bar {
    fn date(&self) -> &str {
        &self.date
    }

    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_consistent_bar() {
        let bar = Bar::try_new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0).unwrap();
        assert_eq!(bar.date(), "2024-01-02");
        assert_eq!(bar.volume(), 500.0);
    }

    #[test]
    fn try_new_accepts_flat_bar() {
        assert!(Bar::try_new("d", 5.0, 5.0, 5.0, 5.0, 0.0).is_ok());
    }

    #[test]
    fn try_new_rejects_inverted_range() {
        let err = Bar::try_new("d", 10.0, 9.0, 11.0, 10.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid bar at d: low above high");
    }

    #[test]
    fn try_new_rejects_close_outside_range() {
        let err = Bar::try_new("d", 10.0, 12.0, 9.0, 13.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidBar { .. }));
    }

    #[test]
    fn try_new_rejects_open_outside_range() {
        assert!(Bar::try_new("d", 8.0, 12.0, 9.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn try_new_rejects_negative_volume() {
        assert!(Bar::try_new("d", 10.0, 12.0, 9.0, 11.0, -1.0).is_err());
    }

    #[test]
    fn try_new_rejects_nan() {
        assert!(Bar::try_new("d", f64::NAN, 12.0, 9.0, 11.0, 1.0).is_err());
    }

    #[test]
    fn new_skips_validation() {
        let bar = Bar::new("d", 10.0, 9.0, 11.0, 10.0, -5.0);
        assert_eq!(bar.low(), 11.0);
    }
}
