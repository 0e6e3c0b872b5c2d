//! Public holiday calendars.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::easter::easter_sunday;
use super::error::CalendarError;
use super::month::check_year;

/// Identifies a public holiday. Display names are a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// 1 January.
    NewYearsDay,
    /// 6 January.
    Epiphany,
    /// Easter Sunday - 2.
    GoodFriday,
    /// Easter Sunday.
    EasterSunday,
    /// Easter Sunday + 1.
    EasterMonday,
    /// 1 May.
    MayDay,
    /// Easter Sunday + 39.
    AscensionDay,
    /// Easter Sunday + 49.
    Pentecost,
    /// 6 June.
    NationalDay,
    /// First Friday on or after 19 June.
    MidsummerEve,
    /// Day after Midsummer Eve.
    MidsummerDay,
    /// First Saturday on or after 31 October.
    AllSaintsDay,
    /// 24 December.
    ChristmasEve,
    /// 25 December.
    ChristmasDay,
    /// 26 December.
    BoxingDay,
    /// 31 December.
    NewYearsEve,
}

/// A public holiday on a concrete date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Holiday {
    /// Date of the holiday.
    pub date: NaiveDate,
    /// Which holiday it is.
    pub kind: HolidayKind,
}

/// Source of public holidays for a country.
pub trait HolidayCalendar: Send + Sync {
    /// Holidays of `year`, sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidYear` for unsupported years.
    fn holidays_for(&self, year: i32) -> Result<Vec<Holiday>, CalendarError>;

    /// Set of holiday dates in `year`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::holidays_for`].
    fn holiday_dates(&self, year: i32) -> Result<BTreeSet<NaiveDate>, CalendarError> {
        Ok(self
            .holidays_for(year)?
            .into_iter()
            .map(|holiday| holiday.date)
            .collect())
    }

    /// Returns the holiday falling on `date`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Self::holidays_for`].
    fn holiday_on(&self, date: NaiveDate) -> Result<Option<Holiday>, CalendarError> {
        Ok(self
            .holidays_for(date.year())?
            .into_iter()
            .find(|holiday| holiday.date == date))
    }

    /// Returns true if `date` is a public holiday.
    ///
    /// # Errors
    ///
    /// Same as [`Self::holidays_for`].
    fn is_holiday(&self, date: NaiveDate) -> Result<bool, CalendarError> {
        Ok(self.holiday_on(date)?.is_some())
    }
}

/// Swedish public holidays (helgdagar), including the de facto days off
/// Midsummer Eve, Christmas Eve and New Year's Eve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishCalendar;

impl HolidayCalendar for SwedishCalendar {
    fn holidays_for(&self, year: i32) -> Result<Vec<Holiday>, CalendarError> {
        check_year(year)?;
        let easter = easter_sunday(year)?;
        let fixed = |month: u32, day: u32| {
            NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidYear(year))
        };

        let midsummer_eve = first_on_or_after(fixed(6, 19)?, Weekday::Fri);

        let mut holidays = vec![
            Holiday { date: fixed(1, 1)?, kind: HolidayKind::NewYearsDay },
            Holiday { date: fixed(1, 6)?, kind: HolidayKind::Epiphany },
            Holiday { date: easter - Days::new(2), kind: HolidayKind::GoodFriday },
            Holiday { date: easter, kind: HolidayKind::EasterSunday },
            Holiday { date: easter + Days::new(1), kind: HolidayKind::EasterMonday },
            Holiday { date: fixed(5, 1)?, kind: HolidayKind::MayDay },
            Holiday { date: easter + Days::new(39), kind: HolidayKind::AscensionDay },
            Holiday { date: easter + Days::new(49), kind: HolidayKind::Pentecost },
            Holiday { date: fixed(6, 6)?, kind: HolidayKind::NationalDay },
            Holiday { date: midsummer_eve, kind: HolidayKind::MidsummerEve },
            Holiday { date: midsummer_eve + Days::new(1), kind: HolidayKind::MidsummerDay },
            Holiday {
                date: first_on_or_after(fixed(10, 31)?, Weekday::Sat),
                kind: HolidayKind::AllSaintsDay,
            },
            Holiday { date: fixed(12, 24)?, kind: HolidayKind::ChristmasEve },
            Holiday { date: fixed(12, 25)?, kind: HolidayKind::ChristmasDay },
            Holiday { date: fixed(12, 26)?, kind: HolidayKind::BoxingDay },
            Holiday { date: fixed(12, 31)?, kind: HolidayKind::NewYearsEve },
        ];

        // Ascension can land on May Day or National Day on Pentecost; keep both kinds.
        holidays.sort();
        Ok(holidays)
    }
}

/// First `weekday` on or after `date`.
fn first_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Days::new(u64::from(ahead))
}
