//! Calendar month value type.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// First supported year (the first full Gregorian year).
pub const MIN_YEAR: i32 = 1583;
/// Last supported year.
pub const MAX_YEAR: i32 = 9999;

/// Checks that a year lies in the supported Gregorian range.
///
/// # Errors
///
/// Returns `CalendarError::InvalidYear` outside `MIN_YEAR..=MAX_YEAR`.
pub const fn check_year(year: i32) -> Result<i32, CalendarError> {
    if year < MIN_YEAR || year > MAX_YEAR {
        Err(CalendarError::InvalidYear(year))
    } else {
        Ok(year)
    }
}

/// A validated calendar month, e.g. `2026-01`.
///
/// Serializes as the `YYYY-MM` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` or `InvalidMonth` for out-of-range input.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        check_year(year)?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(CalendarError::InvalidMonth(month))
    }

    /// Returns the month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` if the date's year is unsupported.
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(date.year(), date.month())
    }

    /// All twelve months of a year, in order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` if the year is unsupported.
    pub fn all_in_year(year: i32) -> Result<Vec<Self>, CalendarError> {
        (1..=12).map(|month| Self::new(year, month)).collect()
    }

    /// Year component.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// Month component (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.first + Days::new(u64::from(self.num_days() - 1))
    }

    /// Number of days in the month.
    #[must_use]
    pub fn num_days(self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Iterates over every day of the month in date order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.num_days() as usize)
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last_day()
    }

    /// The following month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` after December of `MAX_YEAR`.
    pub fn succ(self) -> Result<Self, CalendarError> {
        if self.month() == 12 {
            Self::new(self.year() + 1, 1)
        } else {
            Self::new(self.year(), self.month() + 1)
        }
    }

    /// Every month from `self` through `end`, inclusive. Empty when `end < self`.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidYear` from [`Self::succ`].
    pub fn through(self, end: Self) -> Result<Vec<Self>, CalendarError> {
        let mut months = Vec::new();
        let mut current = self;
        while current <= end {
            months.push(current);
            if current == end {
                break;
            }
            current = current.succ()?;
        }
        Ok(months)
    }
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonthLiteral(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}
