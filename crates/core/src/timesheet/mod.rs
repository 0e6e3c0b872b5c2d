//! Time entry aggregation.
//!
//! Combines a user's reported hours with a classified month into totals per
//! day and per project, and the variance against required hours.

pub mod aggregator;
pub mod error;
pub mod types;


pub use aggregator::aggregate;
pub use error::EntryError;
pub use types::{
    DayTotal, EntryKind, HOURS_SCALE, MAX_ENTRY_HOURS, MonthAggregate, TimeEntry, TravelSummary,
    percent_of,
};
