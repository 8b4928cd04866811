use std::fmt::Display;

/// Trend side reported by trailing-stop indicators ([`Supertrend`] and
/// [`Psar`]).
///
/// [`Supertrend`]: crate::Supertrend
/// [`Psar`]: crate::Psar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Long side: the stop trails below price.
    #[default]
    Up,
    /// Short side: the stop trails above price.
    Down,
}

impl Direction {
    /// `1.0` for [`Up`](Direction::Up), `-1.0` for [`Down`](Direction::Down).
    #[inline]
    #[must_use]
    pub fn signum(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
