//! Report data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use timekeep_shared::types::ProjectId;

use super::error::ReportError;
use crate::calendar::Month;
use crate::timesheet::{HOURS_SCALE, TravelSummary};
use crate::workday::LeaveType;

/// Longest period a report covers: five years.
pub const MAX_REPORT_MONTHS: u32 = 60;

/// Inclusive range of whole months, at most [`MAX_REPORT_MONTHS`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    start: Month,
    end: Month,
}

impl ReportPeriod {
    /// Creates a period from `start` through `end`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` when `start > end` and
    /// `ReportError::RangeTooLong` beyond [`MAX_REPORT_MONTHS`].
    pub fn new(start: Month, end: Month) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        let period = Self { start, end };
        let months = period.month_count();
        if months > MAX_REPORT_MONTHS {
            return Err(ReportError::RangeTooLong {
                months,
                max: MAX_REPORT_MONTHS,
            });
        }
        Ok(period)
    }

    /// January through December of `year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Calendar` for an unsupported year.
    pub fn year(year: i32) -> Result<Self, ReportError> {
        Self::new(Month::new(year, 1)?, Month::new(year, 12)?)
    }

    /// First month.
    #[must_use]
    pub const fn start(&self) -> Month {
        self.start
    }

    /// Last month.
    #[must_use]
    pub const fn end(&self) -> Month {
        self.end
    }

    /// Number of months covered.
    #[must_use]
    pub fn month_count(&self) -> u32 {
        let years = (self.end.year() - self.start.year()).unsigned_abs();
        years * 12 + self.end.month() + 1 - self.start.month()
    }

    /// Whether `month` lies in the period.
    #[must_use]
    pub fn contains(&self, month: Month) -> bool {
        month >= self.start && month <= self.end
    }

    /// Every month of the period in order.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors past the last supported year.
    pub fn months(&self) -> Result<Vec<Month>, ReportError> {
        Ok(self.start.through(self.end)?)
    }
}

/// Worked hours against required hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkedVsRequired {
    /// Sum of project hours.
    pub worked: Decimal,
    /// Sum of required hours.
    pub required: Decimal,
    /// `worked - required`.
    pub variance: Decimal,
    /// Worked as a percentage of required, one decimal.
    pub utilization_percent: Decimal,
}

/// One month of a period summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    /// Month.
    pub month: Month,
    /// Days that are neither weekend nor holiday.
    pub workdays: u32,
    /// Leave days on workdays, by type.
    pub leave_days: BTreeMap<LeaveType, u32>,
    /// Worked hours per project.
    pub hours_by_project: BTreeMap<ProjectId, Decimal>,
    /// Worked versus required for the month.
    pub totals: WorkedVsRequired,
    /// Travel totals for the month.
    pub travel: TravelSummary,
}

/// A project's part of the hours worked in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectShare {
    /// Project.
    pub project_id: ProjectId,
    /// Hours worked on the project.
    pub hours: Decimal,
    /// Share of all worked hours, one decimal.
    pub percent: Decimal,
}

/// Summary of a range of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    /// Summarized period.
    pub period: ReportPeriod,
    /// Worked hours per project.
    pub hours_by_project: BTreeMap<ProjectId, Decimal>,
    /// Leave days on workdays, by type.
    pub leave_days_by_type: BTreeMap<LeaveType, u32>,
    /// Totals over the whole period.
    pub worked_vs_required: WorkedVsRequired,
    /// Travel totals.
    pub travel: TravelSummary,
    /// Workdays in the months that had aggregates.
    pub workdays: u32,
    /// One row per aggregated month, in month order.
    pub months: Vec<MonthlyRow>,
    /// Projects ordered by hours, largest first.
    pub project_shares: Vec<ProjectShare>,
}

/// Planned share of a month's required hours for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectTarget {
    /// Project.
    pub project_id: ProjectId,
    /// Month the target applies to.
    pub month: Month,
    /// Target percentage, 0-100.
    pub percentage: Decimal,
}

impl ProjectTarget {
    /// Creates a target.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTargetPercentage` outside 0-100 or with more
    /// than two decimals.
    pub fn new(
        project_id: ProjectId,
        month: Month,
        percentage: Decimal,
    ) -> Result<Self, ReportError> {
        if percentage < Decimal::ZERO
            || percentage > Decimal::ONE_HUNDRED
            || percentage.normalize().scale() > HOURS_SCALE
        {
            return Err(ReportError::InvalidTargetPercentage(percentage));
        }
        Ok(Self {
            project_id,
            month,
            percentage,
        })
    }
}

/// A project's target set against its actual hours in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetComparison {
    /// Project.
    pub project_id: ProjectId,
    /// Target percentage, if a target is set.
    pub target_percent: Option<Decimal>,
    /// Target percentage applied to the month's required hours.
    pub target_hours: Option<Decimal>,
    /// Hours worked on the project.
    pub actual_hours: Decimal,
    /// Actual hours as a percentage of required hours.
    pub actual_percent: Decimal,
    /// `actual_hours - target_hours`.
    pub difference_hours: Option<Decimal>,
}
