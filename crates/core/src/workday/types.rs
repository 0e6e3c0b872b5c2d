//! Workday data types.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::WorkdayError;
use crate::calendar::{HolidayKind, Month, check_year};

/// Kind of leave. Ordered so that sick leave wins over vacation on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Vacation.
    Vacation,
    /// Sick leave.
    #[serde(alias = "sickness")]
    Sick,
}

/// A contiguous, inclusive range of leave days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeavePeriod {
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
}

impl LeavePeriod {
    /// Creates a leave period.
    ///
    /// # Errors
    ///
    /// Returns `WorkdayError::InvalidDateRange` when `end < start` and
    /// `WorkdayError::Calendar` when either date lies outside the supported years.
    pub fn new(
        leave_type: LeaveType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, WorkdayError> {
        if end < start {
            return Err(WorkdayError::InvalidDateRange { start, end });
        }
        check_year(start.year())?;
        check_year(end.year())?;
        Ok(Self {
            leave_type,
            start,
            end,
        })
    }

    /// Kind of leave.
    #[must_use]
    pub const fn leave_type(&self) -> LeaveType {
        self.leave_type
    }

    /// First day of leave.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of leave.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` is a leave day of this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The part of this period that falls inside `month`, if any.
    #[must_use]
    pub fn clip_to(&self, month: Month) -> Option<Self> {
        let start = self.start.max(month.first_day());
        let end = self.end.min(month.last_day());
        (start <= end).then_some(Self {
            leave_type: self.leave_type,
            start,
            end,
        })
    }

    /// Number of calendar days covered.
    #[must_use]
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Required hours per workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayPolicy {
    hours_per_day: Decimal,
}

impl WorkdayPolicy {
    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns `WorkdayError::NegativeHours` for a negative requirement.
    pub fn new(hours_per_day: Decimal) -> Result<Self, WorkdayError> {
        if hours_per_day < Decimal::ZERO {
            return Err(WorkdayError::NegativeHours(hours_per_day));
        }
        Ok(Self { hours_per_day })
    }

    /// Hours required on each day that requires work.
    #[must_use]
    pub const fn hours_per_day(&self) -> Decimal {
        self.hours_per_day
    }
}

impl Default for WorkdayPolicy {
    fn default() -> Self {
        Self {
            hours_per_day: Decimal::from(8),
        }
    }
}

/// Single display classification of a day.
///
/// Precedence when several conditions hold: holiday, weekend, sick, vacation, workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Plain workday.
    Workday,
    /// Saturday or Sunday.
    Weekend,
    /// Public holiday.
    Holiday,
    /// Vacation day.
    Vacation,
    /// Sick day.
    Sick,
}

/// Classification of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    /// The day.
    pub date: NaiveDate,
    /// Day of week.
    pub weekday: Weekday,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Public holiday on this day, if any.
    pub holiday: Option<HolidayKind>,
    /// Registered leave covering this day, if any.
    pub leave: Option<LeaveType>,
    /// Whether the day counts toward required hours.
    pub requires_work: bool,
}

impl DayStatus {
    /// Builds the status of `date` from its holiday and leave state.
    #[must_use]
    pub fn new(date: NaiveDate, holiday: Option<HolidayKind>, leave: Option<LeaveType>) -> Self {
        let weekday = date.weekday();
        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        Self {
            date,
            weekday,
            is_weekend,
            holiday,
            leave,
            requires_work: !is_weekend && holiday.is_none() && leave.is_none(),
        }
    }

    /// Public holiday flag.
    #[must_use]
    pub const fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    /// Neither weekend nor holiday, regardless of leave.
    #[must_use]
    pub const fn is_workday(&self) -> bool {
        !self.is_weekend && self.holiday.is_none()
    }

    /// Display classification.
    #[must_use]
    pub const fn kind(&self) -> DayKind {
        if self.holiday.is_some() {
            DayKind::Holiday
        } else if self.is_weekend {
            DayKind::Weekend
        } else {
            match self.leave {
                Some(LeaveType::Sick) => DayKind::Sick,
                Some(LeaveType::Vacation) => DayKind::Vacation,
                None => DayKind::Workday,
            }
        }
    }
}
