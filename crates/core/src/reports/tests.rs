//! Tests for the reports module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use timekeep_shared::types::ProjectId;

use super::*;
use crate::calendar::{HolidayCalendar, Month, SwedishCalendar};
use crate::timesheet::{MonthAggregate, TimeEntry, aggregate};
use crate::workday::{LeavePeriod, LeaveType, WorkdayCalculator};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> Month {
    Month::new(y, m).unwrap()
}

/// Aggregate of `year`-`month` with `hours` spread as 8-hour days over the
/// first workdays of the month.
fn month_with_hours(
    year: i32,
    m: u32,
    project: ProjectId,
    hours: u32,
    leave: &[LeavePeriod],
) -> MonthAggregate {
    let holidays = SwedishCalendar.holidays_for(year).unwrap();
    let calendar = WorkdayCalculator::default()
        .classify(year, m, &holidays, leave)
        .unwrap();
    let entries: Vec<TimeEntry> = calendar
        .days()
        .iter()
        .filter(|d| d.requires_work)
        .take((hours / 8) as usize)
        .map(|d| TimeEntry::project(project, d.date, dec!(8)).unwrap())
        .collect();
    aggregate(&entries, &calendar).unwrap()
}

#[test]
fn test_period_validation() {
    assert!(ReportPeriod::new(month(2026, 1), month(2026, 1)).is_ok());
    assert_eq!(
        ReportPeriod::new(month(2026, 3), month(2026, 1)),
        Err(ReportError::InvalidDateRange {
            start: month(2026, 3),
            end: month(2026, 1)
        })
    );
    assert!(matches!(ReportPeriod::year(1500), Err(ReportError::Calendar(_))));
    assert_eq!(ReportPeriod::year(2026).unwrap().months().unwrap().len(), 12);
}

#[test]
fn test_period_length_is_capped_at_five_years() {
    let five_years = ReportPeriod::new(month(2022, 1), month(2026, 12)).unwrap();
    assert_eq!(five_years.month_count(), MAX_REPORT_MONTHS);
    assert_eq!(five_years.months().unwrap().len(), 60);

    assert_eq!(
        ReportPeriod::new(month(2022, 1), month(2027, 1)),
        Err(ReportError::RangeTooLong { months: 61, max: 60 })
    );
    assert_eq!(
        ReportPeriod::new(month(1583, 1), month(9999, 12)),
        Err(ReportError::RangeTooLong {
            months: 101_004,
            max: 60
        })
    );
    assert_eq!(ReportPeriod::new(month(2025, 11), month(2026, 2)).unwrap().month_count(), 4);
}

#[test]
fn test_annual_summary_combines_months() {
    let (alpha, beta) = (ProjectId::new(), ProjectId::new());
    let vacation =
        LeavePeriod::new(LeaveType::Vacation, date(2026, 7, 6), date(2026, 7, 10)).unwrap();
    let aggregates = vec![
        month_with_hours(2026, 7, beta, 104, &[vacation]),
        month_with_hours(2026, 1, alpha, 152, &[]),
        month_with_hours(2025, 12, alpha, 80, &[]),
    ];

    let summary = ReportService::annual(2026, &aggregates).unwrap();

    assert_eq!(summary.hours_by_project.get(&alpha), Some(&dec!(152)));
    assert_eq!(summary.hours_by_project.get(&beta), Some(&dec!(104)));
    assert_eq!(summary.leave_days_by_type.get(&LeaveType::Vacation), Some(&5));
    assert_eq!(summary.worked_vs_required.worked, dec!(256));
    assert_eq!(summary.worked_vs_required.required, dec!(304));
    assert_eq!(summary.worked_vs_required.variance, dec!(-48));
    assert_eq!(summary.workdays, 43);

    let months: Vec<Month> = summary.months.iter().map(|row| row.month).collect();
    assert_eq!(months, vec![month(2026, 1), month(2026, 7)]);
    assert_eq!(summary.months[0].totals.variance, dec!(-8));

    assert_eq!(summary.project_shares[0].project_id, alpha);
    assert_eq!(summary.project_shares[0].percent, dec!(59.4));
    assert_eq!(summary.project_shares[1].percent, dec!(40.6));
}

#[test]
fn test_range_summary_ignores_months_outside() {
    let project = ProjectId::new();
    let aggregates = vec![
        month_with_hours(2026, 1, project, 80, &[]),
        month_with_hours(2026, 2, project, 40, &[]),
        month_with_hours(2026, 4, project, 16, &[]),
    ];
    let period = ReportPeriod::new(month(2026, 1), month(2026, 3)).unwrap();

    let summary = ReportService::summarize(period, &aggregates);
    assert_eq!(summary.worked_vs_required.worked, dec!(120));
    assert_eq!(summary.months.len(), 2);
}

#[test]
fn test_empty_summary() {
    let summary = ReportService::annual(2026, &[]).unwrap();
    assert!(summary.hours_by_project.is_empty());
    assert!(summary.project_shares.is_empty());
    assert_eq!(summary.worked_vs_required.utilization_percent, Decimal::ZERO);
}

#[test]
fn test_target_comparison() {
    let (alpha, gamma, other) = (ProjectId::new(), ProjectId::new(), ProjectId::new());
    let january = month_with_hours(2026, 1, alpha, 152, &[]);
    let targets = [
        ProjectTarget::new(alpha, month(2026, 1), dec!(50)).unwrap(),
        ProjectTarget::new(gamma, month(2026, 1), dec!(25)).unwrap(),
        ProjectTarget::new(other, month(2026, 2), dec!(100)).unwrap(),
    ];

    let comparison = ReportService::target_comparison(&january, &targets);
    assert_eq!(comparison.len(), 2);

    let alpha_row = comparison.iter().find(|c| c.project_id == alpha).unwrap();
    assert_eq!(alpha_row.target_hours, Some(dec!(80)));
    assert_eq!(alpha_row.actual_hours, dec!(152));
    assert_eq!(alpha_row.actual_percent, dec!(95.0));
    assert_eq!(alpha_row.difference_hours, Some(dec!(72)));

    let gamma_row = comparison.iter().find(|c| c.project_id == gamma).unwrap();
    assert_eq!(gamma_row.actual_hours, Decimal::ZERO);
    assert_eq!(gamma_row.difference_hours, Some(dec!(-40)));
}

#[test]
fn test_untargeted_project_is_listed() {
    let project = ProjectId::new();
    let january = month_with_hours(2026, 1, project, 16, &[]);

    let comparison = ReportService::target_comparison(&january, &[]);
    assert_eq!(comparison.len(), 1);
    assert_eq!(comparison[0].target_percent, None);
    assert_eq!(comparison[0].difference_hours, None);
}

#[test]
fn test_target_percentage_bounds() {
    let project = ProjectId::new();
    assert!(ProjectTarget::new(project, month(2026, 1), dec!(0)).is_ok());
    assert!(ProjectTarget::new(project, month(2026, 1), dec!(100)).is_ok());
    assert_eq!(
        ProjectTarget::new(project, month(2026, 1), dec!(100.5)),
        Err(ReportError::InvalidTargetPercentage(dec!(100.5)))
    );
    assert!(ProjectTarget::new(project, month(2026, 1), dec!(-1)).is_err());
}

#[test]
fn test_target_percentage_allows_two_decimals() {
    let project = ProjectId::new();
    assert!(ProjectTarget::new(project, month(2026, 1), dec!(33.33)).is_ok());
    assert!(ProjectTarget::new(project, month(2026, 1), dec!(12.500)).is_ok());
    assert_eq!(
        ProjectTarget::new(project, month(2026, 1), dec!(33.333)),
        Err(ReportError::InvalidTargetPercentage(dec!(33.333)))
    );
}

proptest! {
    #[test]
    fn prop_project_hours_add_up_to_worked(
        monthly in prop::collection::vec((1u32..=12, 0u32..=20), 0..12)
    ) {
        let projects = [ProjectId::new(), ProjectId::new(), ProjectId::new()];
        let mut seen = std::collections::BTreeSet::new();
        let aggregates: Vec<_> = monthly
            .iter()
            .filter(|(m, _)| seen.insert(*m))
            .enumerate()
            .map(|(i, (m, days))| month_with_hours(2026, *m, projects[i % 3], days * 8, &[]))
            .collect();

        let summary = ReportService::annual(2026, &aggregates).unwrap();
        let by_project: Decimal = summary.hours_by_project.values().copied().sum();
        prop_assert_eq!(by_project, summary.worked_vs_required.worked);
        prop_assert!(summary
            .project_shares
            .windows(2)
            .all(|pair| pair[0].hours >= pair[1].hours));
        prop_assert_eq!(summary.months.len(), aggregates.len());
    }
}
