//! Month classification and required hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::WorkdayError;
use super::types::{DayStatus, LeavePeriod, LeaveType, WorkdayPolicy};
use crate::calendar::{Holiday, Month};

/// Classifies the days of a month for one user.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkdayCalculator {
    policy: WorkdayPolicy,
}

impl WorkdayCalculator {
    /// Creates a calculator with the given policy.
    #[must_use]
    pub const fn new(policy: WorkdayPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use.
    #[must_use]
    pub const fn policy(&self) -> WorkdayPolicy {
        self.policy
    }

    /// Classifies every day of `year`-`month`.
    ///
    /// Holidays outside the month are ignored and leave periods are clipped to it.
    ///
    /// # Errors
    ///
    /// Returns `WorkdayError::Calendar` for an invalid year or month.
    pub fn classify(
        &self,
        year: i32,
        month: u32,
        holidays: &[Holiday],
        leave: &[LeavePeriod],
    ) -> Result<MonthCalendar, WorkdayError> {
        Ok(self.classify_month(Month::new(year, month)?, holidays, leave))
    }

    /// Classifies every day of an already validated month.
    #[must_use]
    pub fn classify_month(
        &self,
        month: Month,
        holidays: &[Holiday],
        leave: &[LeavePeriod],
    ) -> MonthCalendar {
        let clipped: Vec<LeavePeriod> = leave.iter().filter_map(|p| p.clip_to(month)).collect();

        let days = month
            .days()
            .map(|date| {
                let holiday = holidays
                    .iter()
                    .filter(|h| h.date == date)
                    .map(|h| h.kind)
                    .min();
                let leave = clipped
                    .iter()
                    .filter(|p| p.contains(date))
                    .map(LeavePeriod::leave_type)
                    .max();
                DayStatus::new(date, holiday, leave)
            })
            .collect();

        MonthCalendar {
            month,
            hours_per_day: self.policy.hours_per_day(),
            days,
        }
    }
}

/// Day-by-day classification of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    month: Month,
    hours_per_day: Decimal,
    days: Vec<DayStatus>,
}

impl MonthCalendar {
    /// The classified month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Required hours per working day used for this classification.
    #[must_use]
    pub const fn hours_per_day(&self) -> Decimal {
        self.hours_per_day
    }

    /// One status per calendar day, in date order.
    #[must_use]
    pub fn days(&self) -> &[DayStatus] {
        &self.days
    }

    /// Status of a single day, if it belongs to this month.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayStatus> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Days that are neither weekend nor holiday.
    #[must_use]
    pub fn workdays(&self) -> u32 {
        count(self.days.iter().filter(|d| d.is_workday()))
    }

    /// Workdays not covered by leave.
    #[must_use]
    pub fn required_days(&self) -> u32 {
        count(self.days.iter().filter(|d| d.requires_work))
    }

    /// `required_days × hours_per_day`.
    #[must_use]
    pub fn required_hours(&self) -> Decimal {
        Decimal::from(self.required_days()) * self.hours_per_day
    }

    /// Leave days of `leave_type` that fall on workdays.
    #[must_use]
    pub fn leave_days(&self, leave_type: LeaveType) -> u32 {
        count(
            self.days
                .iter()
                .filter(|d| d.is_workday() && d.leave == Some(leave_type)),
        )
    }

    /// Leave days on workdays grouped by type; types without days are omitted.
    #[must_use]
    pub fn leave_day_counts(&self) -> BTreeMap<LeaveType, u32> {
        let mut counts = BTreeMap::new();
        for leave_type in self
            .days
            .iter()
            .filter(|d| d.is_workday())
            .filter_map(|d| d.leave)
        {
            *counts.entry(leave_type).or_insert(0) += 1;
        }
        counts
    }
}

fn count<'a>(days: impl Iterator<Item = &'a DayStatus>) -> u32 {
    // A month never has more than 31 days.
    u32::try_from(days.count()).unwrap_or(u32::MAX)
}
