use crate::{Price, math};
use std::collections::VecDeque;

/// Trailing window over the last `capacity` values.
///
/// Before the window fills it behaves as a shrinking window: every statistic
/// is taken over the values seen so far. This is the warm-up policy shared by
/// all indicators.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    capacity: usize,
    window: VecDeque<Price>,
}

impl PriceWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window capacity must be positive");

        Self {
            capacity,
            window: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends `value`, evicting the oldest value once full.
    #[inline]
    pub fn push(&mut self, value: Price) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }

        self.window.push_back(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.window.len() == self.capacity
    }

    /// Sum of the values held, accumulated oldest to newest. Recomputed on
    /// every call so an all-zero window sums to exactly `0.0`.
    pub fn sum(&self) -> Price {
        self.iter().fold(0.0, |acc, v| acc + v)
    }

    /// Mean over the values currently held. `0.0` when empty.
    pub fn mean(&self) -> Price {
        if self.window.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = self.window.len() as f64;
            self.sum() / n
        }
    }

    /// Population standard deviation of the window, recomputed from scratch.
    pub fn stddev(&mut self) -> Price {
        math::stddev(self.window.make_contiguous())
    }

    /// Oldest value, or `None` when empty.
    #[inline]
    pub fn oldest(&self) -> Option<Price> {
        self.window.front().copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Price> + '_ {
        self.window.iter().copied()
    }

    pub fn highest(&self) -> Price {
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn lowest(&self) -> Price {
        self.iter().fold(f64::INFINITY, f64::min)
    }

    /// Index (0 = oldest) of the largest value. Ties resolve to the most
    /// recent occurrence.
    pub fn position_of_highest(&self) -> usize {
        self.position_by(|value, best| value >= best, f64::NEG_INFINITY)
    }

    /// Index (0 = oldest) of the smallest value. Ties resolve to the most
    /// recent occurrence.
    pub fn position_of_lowest(&self) -> usize {
        self.position_by(|value, best| value <= best, f64::INFINITY)
    }

    fn position_by(&self, better: impl Fn(Price, Price) -> bool, identity: Price) -> usize {
        let mut best = identity;
        let mut position = 0;

        for (i, value) in self.iter().enumerate() {
            if better(value, best) {
                best = value;
                position = i;
            }
        }

        position
    }
}
