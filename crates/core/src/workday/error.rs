//! Workday error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calendar::CalendarError;

/// Errors raised while building leave periods or classifying a month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkdayError {
    /// Leave period ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Daily requirement below zero.
    #[error("Hours per day cannot be negative: {0}")]
    NegativeHours(Decimal),

    /// Invalid year or month.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
