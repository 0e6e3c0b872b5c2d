//! Gregorian Easter computation.

use chrono::NaiveDate;

use super::error::CalendarError;
use super::month::check_year;

/// Returns the date of Easter Sunday in the given Gregorian year.
///
/// Uses the anonymous Gregorian algorithm (Meeus/Jones/Butcher), which is exact
/// for every year of the Gregorian calendar.
///
/// # Errors
///
/// Returns `CalendarError::InvalidYear` outside 1583-9999.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timekeep_core::calendar::easter_sunday;
///
/// assert_eq!(
///     easter_sunday(2026).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 4, 5).unwrap()
/// );
/// ```
pub fn easter_sunday(year: i32) -> Result<NaiveDate, CalendarError> {
    check_year(year)?;

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;

    // n / 31 is 3 or 4, n % 31 + 1 is 1..=31
    let month = u32::try_from(n / 31).map_err(|_| CalendarError::InvalidYear(year))?;
    let day = u32::try_from(n % 31 + 1).map_err(|_| CalendarError::InvalidYear(year))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidYear(year))
}
