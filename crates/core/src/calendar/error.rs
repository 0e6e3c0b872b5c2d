//! Calendar error types.

use thiserror::Error;

/// Errors raised by calendar computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Year outside the supported Gregorian range.
    #[error("Year {0} is outside the supported range 1583-9999")]
    InvalidYear(i32),

    /// Month number outside 1-12.
    #[error("Month {0} is not a calendar month")]
    InvalidMonth(u32),

    /// Text that does not parse as `YYYY-MM`.
    #[error("Invalid month literal: {0}")]
    InvalidMonthLiteral(String),
}
