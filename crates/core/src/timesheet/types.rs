//! Time entry and aggregate types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use timekeep_shared::types::ProjectId;

use super::error::EntryError;
use crate::calendar::Month;
use crate::workday::LeaveType;

/// Upper bound for a single entry.
pub const MAX_ENTRY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Decimal places stored for hours and percentages.
pub const HOURS_SCALE: u32 = 2;

/// What a reported amount of hours was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// Work on a project.
    Project {
        /// Project worked on.
        project_id: ProjectId,
    },
    /// Travel time, optionally with a per diem allowance.
    Travel {
        /// Per diem claimed for the day.
        per_diem: bool,
    },
}

/// Hours reported for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    kind: EntryKind,
    date: NaiveDate,
    hours: Decimal,
}

impl TimeEntry {
    /// Hours worked on `project_id`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NegativeHours` for negative hours, `TooManyHours`
    /// above [`MAX_ENTRY_HOURS`] and `TooPrecise` beyond two decimals.
    pub fn project(
        project_id: ProjectId,
        date: NaiveDate,
        hours: Decimal,
    ) -> Result<Self, EntryError> {
        Self::new(EntryKind::Project { project_id }, date, hours)
    }

    /// Travel hours for a day.
    ///
    /// # Errors
    ///
    /// Same as [`TimeEntry::project`].
    pub fn travel(date: NaiveDate, hours: Decimal, per_diem: bool) -> Result<Self, EntryError> {
        Self::new(EntryKind::Travel { per_diem }, date, hours)
    }

    fn new(kind: EntryKind, date: NaiveDate, hours: Decimal) -> Result<Self, EntryError> {
        if hours < Decimal::ZERO {
            return Err(EntryError::NegativeHours(hours));
        }
        if hours > MAX_ENTRY_HOURS {
            return Err(EntryError::TooManyHours(hours));
        }
        if hours.normalize().scale() > HOURS_SCALE {
            return Err(EntryError::TooPrecise(hours));
        }
        Ok(Self { kind, date, hours })
    }

    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Reported day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Reported hours.
    #[must_use]
    pub const fn hours(&self) -> Decimal {
        self.hours
    }

    /// Project of a project entry.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        match self.kind {
            EntryKind::Project { project_id } => Some(project_id),
            EntryKind::Travel { .. } => None,
        }
    }
}

/// Totals for one day with at least one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    /// Project hours.
    pub worked: Decimal,
    /// Travel hours.
    pub travel: Decimal,
    /// Per diem claimed.
    pub per_diem: bool,
}

/// Travel totals. Travel hours are never worked hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TravelSummary {
    /// Total travel hours.
    pub hours: Decimal,
    /// Days with per diem claimed.
    pub per_diem_days: u32,
}

impl std::ops::AddAssign for TravelSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.hours += rhs.hours;
        self.per_diem_days += rhs.per_diem_days;
    }
}

/// Reported hours of one month set against its required hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthAggregate {
    /// Aggregated month.
    pub month: Month,
    /// Totals per day with entries.
    pub per_day: BTreeMap<NaiveDate, DayTotal>,
    /// Worked hours per project.
    pub per_project: BTreeMap<ProjectId, Decimal>,
    /// Travel totals.
    pub travel: TravelSummary,
    /// Days that are neither weekend nor holiday.
    pub workdays: u32,
    /// Leave days on workdays, by type.
    pub leave_days: BTreeMap<LeaveType, u32>,
    /// Sum of project hours.
    pub total_worked: Decimal,
    /// Hours the user was required to work.
    pub total_required: Decimal,
    /// `total_worked - total_required`; positive means overtime.
    pub variance: Decimal,
}

impl MonthAggregate {
    /// Worked hours as a percentage of required hours, one decimal.
    #[must_use]
    pub fn utilization_percent(&self) -> Decimal {
        percent_of(self.total_worked, self.total_required)
    }
}

/// `part / whole × 100` rounded to one decimal; zero when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(1)
}
