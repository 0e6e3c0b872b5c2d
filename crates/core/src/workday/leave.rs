//! Leave period helpers.

use super::types::LeavePeriod;

/// Merges overlapping or back-to-back periods of the same leave type for display.
///
/// The result is ordered by start date, then leave type. Periods of different
/// types are never merged.
#[must_use]
pub fn merge_leave_periods(periods: &[LeavePeriod]) -> Vec<LeavePeriod> {
    let mut sorted = periods.to_vec();
    sorted.sort_by_key(|p| (p.leave_type(), p.start(), p.end()));

    let mut merged: Vec<LeavePeriod> = Vec::with_capacity(sorted.len());
    for period in sorted {
        match merged.last_mut() {
            Some(last)
                if last.leave_type() == period.leave_type()
                    && last
                        .end()
                        .succ_opt()
                        .is_none_or(|next| period.start() <= next) =>
            {
                if period.end() > last.end() {
                    // start <= end is preserved: last.start() <= period.start() <= period.end()
                    if let Ok(extended) =
                        LeavePeriod::new(last.leave_type(), last.start(), period.end())
                    {
                        *last = extended;
                    }
                }
            }
            _ => merged.push(period),
        }
    }

    merged.sort_by_key(|p| (p.start(), p.leave_type()));
    merged
}
