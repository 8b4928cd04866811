use thiserror::Error;

/// Errors raised by the fallible constructors.
///
/// Indicator computation itself never fails; degenerate inputs resolve to
/// fixed fallback values. Only data and parameter validation at the API
/// boundary can report an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A bar violates the OHLCV invariants.
    #[error("invalid bar at {date}: {reason}")]
    InvalidBar { date: String, reason: String },

    /// A band or step multiplier is zero, negative, or not finite.
    #[error("multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f64),
}
