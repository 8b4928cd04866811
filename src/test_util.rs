// src/test_util.rs

use crate::{Ohlcv, Price};
use std::num::NonZero;

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

pub struct Bar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date: String::new(),
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    pub fn on(mut self, date: &str) -> Self {
        self.date = date.to_owned();
        self
    }

    pub fn vol(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

/// Convenience: bar with just a close price (OHLC all equal to close).
pub fn bar(close: f64) -> Bar {
    Bar::new(close, close, close, close)
}

/// Convenience: bar with high, low, close (open equals close).
pub fn hlc(high: f64, low: f64, close: f64) -> Bar {
    Bar::new(close, high, low, close)
}

/// Flat bars for the given closes, dated `d0`, `d1`, ...
pub fn bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| bar(c).on(&format!("d{i}")))
        .collect()
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
