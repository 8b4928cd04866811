use std::{collections::BTreeMap, num::NonZero};

use tracing::debug;

use crate::{Ema, EmaConfig, Ohlcv, Point, Price, nonzero};

/// Fibonacci-spaced EMA lengths used for a moving-average ribbon.
pub const DEFAULT_RIBBON_PERIODS: [NonZero<usize>; 8] = [
    nonzero(8),
    nonzero(13),
    nonzero(21),
    nonzero(34),
    nonzero(55),
    nonzero(89),
    nonzero(144),
    nonzero(200),
];

/// Computes one close-price EMA series per period.
///
/// Keys are `"ema{period}"`. Every series has one point per bar. Duplicate
/// periods collapse into a single entry.
///
/// # Example
///
/// ```
/// use quantdash_ta::{Bar, DEFAULT_RIBBON_PERIODS, ma_ribbon};
///
/// let bars: Vec<Bar> = (0..10)
///     .map(|i| Bar::new(format!("d{i}"), 1.0, 1.0, 1.0, 1.0, 0.0))
///     .collect();
///
/// let ribbon = ma_ribbon(&bars, &DEFAULT_RIBBON_PERIODS);
/// assert_eq!(ribbon.len(), 8);
/// assert_eq!(ribbon["ema21"].len(), 10);
/// ```
#[must_use]
pub fn ma_ribbon<B: Ohlcv>(
    bars: &[B],
    periods: &[NonZero<usize>],
) -> BTreeMap<String, Vec<Point<Price>>> {
    if periods.is_empty() {
        debug!(bars = bars.len(), "ribbon requested without periods");
    }

    periods
        .iter()
        .map(|&period| {
            let series = Ema::batch(EmaConfig::close(period), bars);
            (format!("ema{period}"), series)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bars, nz};

    #[test]
    fn default_periods() {
        let periods: Vec<usize> = DEFAULT_RIBBON_PERIODS.iter().map(|p| p.get()).collect();
        assert_eq!(periods, vec![8, 13, 21, 34, 55, 89, 144, 200]);
    }

    #[test]
    fn keys_follow_periods() {
        let input = bars(&[1.0, 2.0, 3.0]);
        let ribbon = ma_ribbon(&input, &[nz(2), nz(5)]);

        let keys: Vec<&str> = ribbon.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ema2", "ema5"]);
    }

    #[test]
    fn each_series_matches_standalone_ema() {
        let input = bars(&[10.0, 12.0, 11.0, 15.0, 14.0]);
        let ribbon = ma_ribbon(&input, &[nz(3)]);

        assert_eq!(ribbon["ema3"], Ema::batch(EmaConfig::close(nz(3)), &input));
    }

    #[test]
    fn empty_periods_give_empty_map() {
        let input = bars(&[1.0]);
        assert!(ma_ribbon(&input, &[]).is_empty());
    }
}
