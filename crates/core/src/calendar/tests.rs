//! Tests for the calendar module.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn kind_date(holidays: &[Holiday], kind: HolidayKind) -> NaiveDate {
    holidays
        .iter()
        .find(|h| h.kind == kind)
        .map(|h| h.date)
        .unwrap()
}

#[rstest]
#[case(1818, date(1818, 3, 22))]
#[case(2000, date(2000, 4, 23))]
#[case(2011, date(2011, 4, 24))]
#[case(2019, date(2019, 4, 21))]
#[case(2024, date(2024, 3, 31))]
#[case(2025, date(2025, 4, 20))]
#[case(2026, date(2026, 4, 5))]
#[case(2038, date(2038, 4, 25))]
fn test_easter_sunday_known_dates(#[case] year: i32, #[case] expected: NaiveDate) {
    assert_eq!(easter_sunday(year).unwrap(), expected);
}

#[rstest]
#[case(1582)]
#[case(10_000)]
#[case(-4)]
fn test_unsupported_years_are_rejected(#[case] year: i32) {
    assert_eq!(easter_sunday(year), Err(CalendarError::InvalidYear(year)));
    assert_eq!(
        SwedishCalendar.holidays_for(year),
        Err(CalendarError::InvalidYear(year))
    );
}

#[test]
fn test_swedish_holidays_2026() {
    let holidays = SwedishCalendar.holidays_for(2026).unwrap();

    assert_eq!(kind_date(&holidays, HolidayKind::GoodFriday), date(2026, 4, 3));
    assert_eq!(kind_date(&holidays, HolidayKind::EasterSunday), date(2026, 4, 5));
    assert_eq!(kind_date(&holidays, HolidayKind::EasterMonday), date(2026, 4, 6));
    assert_eq!(kind_date(&holidays, HolidayKind::AscensionDay), date(2026, 5, 14));
    assert_eq!(kind_date(&holidays, HolidayKind::Pentecost), date(2026, 5, 24));
    assert_eq!(kind_date(&holidays, HolidayKind::MidsummerEve), date(2026, 6, 19));
    assert_eq!(kind_date(&holidays, HolidayKind::MidsummerDay), date(2026, 6, 20));
    assert_eq!(kind_date(&holidays, HolidayKind::AllSaintsDay), date(2026, 10, 31));
    assert_eq!(holidays.len(), 16);
}

#[test]
fn test_holidays_are_sorted_by_date() {
    let holidays = SwedishCalendar.holidays_for(2027).unwrap();
    assert!(holidays.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[test]
fn test_holiday_dates_and_lookup() {
    let dates = SwedishCalendar.holiday_dates(2026).unwrap();
    assert!(dates.contains(&date(2026, 1, 1)));
    assert!(dates.contains(&date(2026, 1, 6)));
    assert!(!dates.contains(&date(2026, 1, 2)));

    let christmas = SwedishCalendar.holiday_on(date(2026, 12, 25)).unwrap();
    assert_eq!(christmas.map(|h| h.kind), Some(HolidayKind::ChristmasDay));
    assert_eq!(SwedishCalendar.holiday_on(date(2026, 3, 3)).unwrap(), None);
    assert!(SwedishCalendar.is_holiday(date(2026, 6, 19)).unwrap());
    assert!(!SwedishCalendar.is_holiday(date(2026, 6, 18)).unwrap());
}

#[test]
fn test_month_basics() {
    let january = Month::new(2026, 1).unwrap();
    assert_eq!(january.num_days(), 31);
    assert_eq!(january.first_day(), date(2026, 1, 1));
    assert_eq!(january.last_day(), date(2026, 1, 31));
    assert_eq!(january.days().count(), 31);
    assert!(january.contains(date(2026, 1, 15)));
    assert!(!january.contains(date(2026, 2, 1)));
    assert_eq!(january.to_string(), "2026-01");
}

#[rstest]
#[case(2024, 29)]
#[case(2026, 28)]
#[case(1900, 28)]
#[case(2000, 29)]
fn test_february_length(#[case] year: i32, #[case] days: u32) {
    assert_eq!(Month::new(year, 2).unwrap().num_days(), days);
}

#[test]
fn test_month_validation() {
    assert_eq!(Month::new(2026, 13), Err(CalendarError::InvalidMonth(13)));
    assert_eq!(Month::new(2026, 0), Err(CalendarError::InvalidMonth(0)));
    assert_eq!(Month::new(1200, 1), Err(CalendarError::InvalidYear(1200)));
}

#[test]
fn test_month_parse_and_serde() {
    let month: Month = "2026-07".parse().unwrap();
    assert_eq!((month.year(), month.month()), (2026, 7));
    assert!("2026".parse::<Month>().is_err());
    assert!("2026-xx".parse::<Month>().is_err());

    let json = serde_json::to_string(&month).unwrap();
    assert_eq!(json, "\"2026-07\"");
    let back: Month = serde_json::from_str(&json).unwrap();
    assert_eq!(back, month);
}

#[test]
fn test_month_succ_and_through() {
    let december = Month::new(2025, 12).unwrap();
    assert_eq!(december.succ().unwrap(), Month::new(2026, 1).unwrap());

    let months = Month::new(2025, 11)
        .unwrap()
        .through(Month::new(2026, 2).unwrap())
        .unwrap();
    assert_eq!(months.len(), 4);
    assert!(
        Month::new(2026, 2)
            .unwrap()
            .through(Month::new(2026, 1).unwrap())
            .unwrap()
            .is_empty()
    );
    assert!(Month::new(9999, 12).unwrap().succ().is_err());
}

proptest! {
    #[test]
    fn prop_easter_derived_holidays_keep_their_offsets(year in MIN_YEAR..=MAX_YEAR) {
        let easter = easter_sunday(year).unwrap();
        let holidays = SwedishCalendar.holidays_for(year).unwrap();

        prop_assert_eq!(easter.weekday(), Weekday::Sun);
        prop_assert_eq!(kind_date(&holidays, HolidayKind::GoodFriday), easter - Days::new(2));
        prop_assert_eq!(kind_date(&holidays, HolidayKind::Pentecost), easter + Days::new(49));
        prop_assert_eq!(kind_date(&holidays, HolidayKind::AscensionDay), easter + Days::new(39));
    }

    #[test]
    fn prop_easter_falls_between_march_22_and_april_25(year in MIN_YEAR..=MAX_YEAR) {
        let easter = easter_sunday(year).unwrap();
        prop_assert!(easter >= date(year, 3, 22));
        prop_assert!(easter <= date(year, 4, 25));
    }

    #[test]
    fn prop_midsummer_eve_is_friday_in_window(year in MIN_YEAR..=MAX_YEAR) {
        let holidays = SwedishCalendar.holidays_for(year).unwrap();
        let eve = kind_date(&holidays, HolidayKind::MidsummerEve);
        prop_assert_eq!(eve.weekday(), Weekday::Fri);
        prop_assert!(eve.month() == 6 && (19..=25).contains(&eve.day()));
    }
}
