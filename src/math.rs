//! Numeric primitives shared by the indicators.
//!
//! All functions are total: empty input yields a neutral value instead of
//! `NaN`, so that series stay defined at their boundaries. Sums accumulate
//! strictly left to right.

use crate::{Ohlcv, Price};

/// Sum of `values`, accumulated left to right. `0.0` when empty.
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Arithmetic mean. `0.0` when empty.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        sum(values) / n
    }
}

/// Population standard deviation (divides by `N`, not `N − 1`).
/// `0.0` when empty.
#[must_use]
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let m = mean(values);
    let squares = values.iter().fold(0.0, |acc, v| {
        let d = v - m;
        acc + d * d
    });

    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    (squares / n).sqrt()
}

/// Largest value, or `f64::NEG_INFINITY` when empty.
#[must_use]
pub fn highest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Smallest value, or `f64::INFINITY` when empty.
#[must_use]
pub fn lowest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Typical price: `(high + low + close) / 3`.
#[inline]
#[must_use]
pub fn typical_price(bar: &impl Ohlcv) -> Price {
    (bar.high() + bar.low() + bar.close()) / 3.0
}

/// True range: `max(high − low, |high − prev_close|, |low − prev_close|)`.
#[inline]
#[must_use]
pub fn true_range(high: Price, low: Price, prev_close: Price) -> Price {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();

    hl.max(hc).max(lc)
}
