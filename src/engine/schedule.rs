//! Calendar stepping helpers shared by the series expanders.

use chrono::{Datelike, Duration, NaiveDate};

/// Advances `date` by whole calendar months, clamping the day-of-month to
/// the length of the target month (Jan 31 + 1 month lands on Feb 28/29).
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

/// Advances `date` by whole years, clamping Feb 29 to Feb 28 off leap years.
pub fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_month_clamps_to_month_end() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(shift_month(date(2024, 3, 31), 1), date(2024, 4, 30));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(date(2024, 11, 15), 3), date(2025, 2, 15));
        assert_eq!(shift_month(date(2024, 2, 10), -3), date(2023, 11, 10));
    }

    #[test]
    fn shift_year_handles_leap_day() {
        assert_eq!(shift_year(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(shift_year(date(2024, 2, 29), 4), date(2028, 2, 29));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
