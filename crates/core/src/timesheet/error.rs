//! Time entry error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use timekeep_shared::types::ProjectId;

/// Errors raised while building or aggregating time entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Reported hours below zero.
    #[error("Hours cannot be negative: {0}")]
    NegativeHours(Decimal),

    /// More hours than a day has.
    #[error("Hours cannot exceed 24 per entry: {0}")]
    TooManyHours(Decimal),

    /// Hours finer than hundredths.
    #[error("Hours allow at most two decimals: {0}")]
    TooPrecise(Decimal),

    /// Second entry for the same project and day.
    #[error("Duplicate entry for project {project} on {date}")]
    DuplicateEntry {
        /// Project.
        project: ProjectId,
        /// Day.
        date: NaiveDate,
    },

    /// Second travel entry for the same day.
    #[error("Duplicate travel entry on {0}")]
    DuplicateTravel(NaiveDate),
}
