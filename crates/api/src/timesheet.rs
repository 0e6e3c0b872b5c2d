//! Loading of stored entries and leave into classified, aggregated months.

use std::collections::{BTreeMap, btree_map::Entry};

use timekeep_core::{
    calendar::{Holiday, Month},
    timesheet::{MonthAggregate, TimeEntry, aggregate},
    workday::{LeavePeriod, MonthCalendar},
};
use timekeep_db::{
    LeaveRepository, TimeEntryRepository,
    entities::time_entries,
    repositories::{to_leave_period, to_time_entry},
};
use timekeep_shared::{AppError, types::UserId};

use crate::{AppState, error::ApiError};

/// One classified month with its aggregate.
#[derive(Debug, Clone)]
pub struct LoadedMonth {
    /// Day classification.
    pub calendar: MonthCalendar,
    /// Hours reported against the classification.
    pub aggregate: MonthAggregate,
}

/// Stored rows and computed months for a run of consecutive months.
#[derive(Debug, Clone, Default)]
pub struct LoadedRange {
    /// Raw entry rows in the range, ordered by date.
    pub entries: Vec<time_entries::Model>,
    /// One item per requested month, in order.
    pub months: Vec<LoadedMonth>,
}

/// Loads a user's entries and leave for `months` and aggregates each month.
///
/// `months` must be sorted. The store is queried once for the whole range and
/// entries are bucketed by month before aggregating.
pub async fn load_months(
    state: &AppState,
    user_id: UserId,
    months: &[Month],
) -> Result<LoadedRange, ApiError> {
    let (Some(first), Some(last)) = (months.first(), months.last()) else {
        return Ok(LoadedRange::default());
    };
    let (from, to) = (first.first_day(), last.last_day());

    let leave_rows = LeaveRepository::new((*state.db).clone())
        .list_overlapping(user_id, from, to)
        .await?;
    let entry_rows = TimeEntryRepository::new((*state.db).clone())
        .list_in_range(user_id, from, to)
        .await?;

    let leave = leave_rows
        .iter()
        .map(to_leave_period)
        .collect::<Result<Vec<LeavePeriod>, _>>()
        .map_err(|e| ApiError(AppError::Internal(format!("stored leave period: {e}"))))?;

    let mut entries_by_month: BTreeMap<Month, Vec<TimeEntry>> = BTreeMap::new();
    for row in &entry_rows {
        let entry = to_time_entry(row)
            .map_err(|e| ApiError(AppError::Internal(format!("stored time entry: {e}"))))?;
        entries_by_month
            .entry(Month::containing(entry.date())?)
            .or_default()
            .push(entry);
    }

    let mut holidays: BTreeMap<i32, Vec<Holiday>> = BTreeMap::new();
    let mut loaded = Vec::with_capacity(months.len());
    for &month in months {
        let year_holidays = match holidays.entry(month.year()) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => slot.insert(state.calendar.holidays_for(month.year())?),
        };

        let calendar = state.calculator.classify_month(month, year_holidays, &leave);
        let entries = entries_by_month.get(&month).map_or(&[][..], Vec::as_slice);
        let aggregate = aggregate(entries, &calendar)?;
        loaded.push(LoadedMonth {
            calendar,
            aggregate,
        });
    }

    Ok(LoadedRange {
        entries: entry_rows,
        months: loaded,
    })
}
