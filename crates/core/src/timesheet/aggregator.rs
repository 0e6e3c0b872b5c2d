//! Month aggregation of time entries.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use super::error::EntryError;
use super::types::{DayTotal, EntryKind, MonthAggregate, TimeEntry, TravelSummary};
use crate::workday::MonthCalendar;

/// Aggregates `entries` over the month classified by `calendar`.
///
/// Entries dated outside the month are ignored. Travel hours are collected
/// separately and never count as worked hours.
///
/// # Errors
///
/// - `NegativeHours` if an entry reports negative hours
/// - `DuplicateEntry` for a second entry on the same project and day
/// - `DuplicateTravel` for a second travel entry on the same day
pub fn aggregate(
    entries: &[TimeEntry],
    calendar: &MonthCalendar,
) -> Result<MonthAggregate, EntryError> {
    let month = calendar.month();

    let mut per_day: BTreeMap<_, DayTotal> = BTreeMap::new();
    let mut per_project: BTreeMap<_, Decimal> = BTreeMap::new();
    let mut travel = TravelSummary::default();
    let mut seen_project = BTreeSet::new();
    let mut seen_travel = BTreeSet::new();

    for entry in entries.iter().filter(|e| month.contains(e.date())) {
        let (date, hours) = (entry.date(), entry.hours());
        if hours < Decimal::ZERO {
            return Err(EntryError::NegativeHours(hours));
        }

        let day = per_day.entry(date).or_default();
        match entry.kind() {
            EntryKind::Project { project_id } => {
                if !seen_project.insert((project_id, date)) {
                    return Err(EntryError::DuplicateEntry {
                        project: project_id,
                        date,
                    });
                }
                day.worked += hours;
                *per_project.entry(project_id).or_default() += hours;
            }
            EntryKind::Travel { per_diem } => {
                if !seen_travel.insert(date) {
                    return Err(EntryError::DuplicateTravel(date));
                }
                day.travel += hours;
                day.per_diem = per_diem;
                travel.hours += hours;
                if per_diem {
                    travel.per_diem_days += 1;
                }
            }
        }
    }

    let total_worked: Decimal = per_project.values().copied().sum();
    let total_required = calendar.required_hours();

    Ok(MonthAggregate {
        month,
        per_day,
        per_project,
        travel,
        workdays: calendar.workdays(),
        leave_days: calendar.leave_day_counts(),
        total_worked,
        total_required,
        variance: total_worked - total_required,
    })
}
