//! Working-day classification.
//!
//! Classifies each day of a month as workday, weekend, holiday, vacation or
//! sick leave and derives the hours a user is required to work.

pub mod calculator;
pub mod error;
pub mod leave;
pub mod types;


pub use calculator::{MonthCalendar, WorkdayCalculator};
pub use error::WorkdayError;
pub use leave::merge_leave_periods;
pub use types::{DayKind, DayStatus, LeavePeriod, LeaveType, WorkdayPolicy};
