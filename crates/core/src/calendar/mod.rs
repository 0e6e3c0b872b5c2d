//! Public holidays and calendar months.
//!
//! Holidays are derived data: they are computed per year from calendar rules
//! and never persisted.

pub mod easter;
pub mod error;
pub mod holidays;
pub mod month;

#[cfg(test)]
mod tests;

pub use easter::easter_sunday;
pub use error::CalendarError;
pub use holidays::{Holiday, HolidayCalendar, HolidayKind, SwedishCalendar};
pub use month::{MAX_YEAR, MIN_YEAR, Month, check_year};
