//! Report error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calendar::{CalendarError, Month};

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start month.
        start: Month,
        /// End month.
        end: Month,
    },

    /// Period longer than reports allow.
    #[error("Report period spans {months} months, at most {max} allowed")]
    RangeTooLong {
        /// Requested months.
        months: u32,
        /// Allowed months.
        max: u32,
    },

    /// Target percentage outside 0-100 or finer than hundredths.
    #[error("Target percentage must be between 0 and 100 with at most two decimals, got {0}")]
    InvalidTargetPercentage(Decimal),

    /// Invalid year or month.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
