//! Display mapping for the month view.
//!
//! The core only produces classification enums; colours and holiday names are
//! chosen here.

use serde::Serialize;
use timekeep_core::{calendar::HolidayKind, workday::DayKind};

/// Colour of a day cell in the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayColor {
    /// Public holiday.
    Red,
    /// Weekend.
    Yellow,
    /// Vacation.
    Blue,
    /// Sick leave.
    Orange,
}

/// Colour for a day classification; plain workdays have none.
#[must_use]
pub const fn day_color(kind: DayKind) -> Option<DayColor> {
    match kind {
        DayKind::Holiday => Some(DayColor::Red),
        DayKind::Weekend => Some(DayColor::Yellow),
        DayKind::Vacation => Some(DayColor::Blue),
        DayKind::Sick => Some(DayColor::Orange),
        DayKind::Workday => None,
    }
}

/// Swedish name of a holiday.
#[must_use]
pub const fn holiday_name(kind: HolidayKind) -> &'static str {
    match kind {
        HolidayKind::NewYearsDay => "Nyårsdagen",
        HolidayKind::Epiphany => "Trettondedag jul",
        HolidayKind::GoodFriday => "Långfredagen",
        HolidayKind::EasterSunday => "Påskdagen",
        HolidayKind::EasterMonday => "Annandag påsk",
        HolidayKind::MayDay => "Första maj",
        HolidayKind::AscensionDay => "Kristi himmelsfärdsdag",
        HolidayKind::Pentecost => "Pingstdagen",
        HolidayKind::NationalDay => "Sveriges nationaldag",
        HolidayKind::MidsummerEve => "Midsommarafton",
        HolidayKind::MidsummerDay => "Midsommardagen",
        HolidayKind::AllSaintsDay => "Alla helgons dag",
        HolidayKind::ChristmasEve => "Julafton",
        HolidayKind::ChristmasDay => "Juldagen",
        HolidayKind::BoxingDay => "Annandag jul",
        HolidayKind::NewYearsEve => "Nyårsafton",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DayKind::Holiday, Some(DayColor::Red))]
    #[case(DayKind::Weekend, Some(DayColor::Yellow))]
    #[case(DayKind::Vacation, Some(DayColor::Blue))]
    #[case(DayKind::Sick, Some(DayColor::Orange))]
    #[case(DayKind::Workday, None)]
    fn test_day_color(#[case] kind: DayKind, #[case] expected: Option<DayColor>) {
        assert_eq!(day_color(kind), expected);
    }

    #[test]
    fn test_colors_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DayColor::Orange).unwrap(), "\"orange\"");
    }

    #[test]
    fn test_holiday_names() {
        assert_eq!(holiday_name(HolidayKind::MidsummerEve), "Midsommarafton");
        assert_eq!(holiday_name(HolidayKind::Epiphany), "Trettondedag jul");
    }
}
