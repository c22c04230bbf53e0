use serde::Serialize;
use time::{macros::format_description, Date, Duration, Weekday};

use crate::error::KitchenError;

/// Day offsets from a date to the Monday and Friday of its business week.
/// Saturday and Sunday resolve to the week that just ended.
const WEEK_OFFSETS: [(Weekday, i64, i64); 7] = [
    (Weekday::Monday, 0, 4),
    (Weekday::Tuesday, -1, 3),
    (Weekday::Wednesday, -2, 2),
    (Weekday::Thursday, -3, 1),
    (Weekday::Friday, -4, 0),
    (Weekday::Saturday, -5, -1),
    (Weekday::Sunday, -6, -2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessWeek {
    pub monday: Date,
    pub friday: Date,
}

impl BusinessWeek {
    /// Monday through Friday, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let friday = self.friday;
        std::iter::successors(Some(self.monday), |d| d.next_day()).take_while(move |d| *d <= friday)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.monday <= date && date <= self.friday
    }
}

pub fn week_bounds(date: Date) -> Result<BusinessWeek, KitchenError> {
    let weekday = date.weekday();
    let (to_monday, to_friday) = WEEK_OFFSETS
        .iter()
        .find(|(day, _, _)| *day == weekday)
        .map(|(_, monday, friday)| (*monday, *friday))
        .ok_or_else(|| KitchenError::InvariantViolation(format!("unclassified weekday {weekday}")))?;

    Ok(BusinessWeek {
        monday: shift(date, to_monday)?,
        friday: shift(date, to_friday)?,
    })
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Parses `YYYY-MM-DD` as sent in paths and query strings.
pub fn parse_date(raw: &str) -> Result<Date, KitchenError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| KitchenError::Validation(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

fn shift(date: Date, days: i64) -> Result<Date, KitchenError> {
    date.checked_add(Duration::days(days)).ok_or_else(|| {
        KitchenError::InvariantViolation(format!("{date} shifted by {days} days is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn wednesday_resolves_to_enclosing_week() {
        let week = week_bounds(date!(2024 - 06 - 12)).unwrap();
        assert_eq!(week.monday, date!(2024 - 06 - 10));
        assert_eq!(week.friday, date!(2024 - 06 - 14));
    }

    #[test]
    fn every_weekday_maps_into_the_same_business_week() {
        let monday = date!(2024 - 06 - 10);
        let friday = date!(2024 - 06 - 14);
        for offset in 0..5 {
            let day = monday + Duration::days(offset);
            let week = week_bounds(day).unwrap();
            assert_eq!(week.monday, monday, "monday for {day}");
            assert_eq!(week.friday, friday, "friday for {day}");
            assert!(week.contains(day));
        }
    }

    #[test]
    fn weekend_maps_to_preceding_week() {
        for day in [date!(2024 - 06 - 15), date!(2024 - 06 - 16)] {
            let week = week_bounds(day).unwrap();
            assert_eq!(week.monday, date!(2024 - 06 - 10));
            assert_eq!(week.friday, date!(2024 - 06 - 14));
            assert!(!week.contains(day));
        }
    }

    #[test]
    fn week_crossing_a_month_boundary() {
        let week = week_bounds(date!(2024 - 07 - 01)).unwrap();
        assert_eq!(week.monday, date!(2024 - 07 - 01));
        assert_eq!(week.friday, date!(2024 - 07 - 05));

        let week = week_bounds(date!(2024 - 05 - 31)).unwrap();
        assert_eq!(week.monday, date!(2024 - 05 - 27));
        assert_eq!(week.friday, date!(2024 - 05 - 31));
    }

    #[test]
    fn days_yields_five_weekdays() {
        let week = week_bounds(date!(2024 - 06 - 12)).unwrap();
        let days: Vec<Date> = week.days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&week.monday));
        assert_eq!(days.last(), Some(&week.friday));
        assert!(days.iter().all(|d| !is_weekend(*d)));
    }

    #[test]
    fn calendar_edges_resolve_without_overflow() {
        // Date::MIN is a Monday and Date::MAX a Friday.
        let first = week_bounds(Date::MIN).unwrap();
        assert_eq!(first.monday, Date::MIN);
        let last = week_bounds(Date::MAX).unwrap();
        assert_eq!(last.friday, Date::MAX);
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(parse_date("2024-06-12").unwrap(), date!(2024 - 06 - 12));
        assert!(matches!(
            parse_date("12.06.2024"),
            Err(KitchenError::Validation(_))
        ));
    }
}
