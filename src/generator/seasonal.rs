//! Seasonal weighting of order dates.
//!
//! The sampling density of a calendar day is a pure function of its month.
//! Holiday-season months (October through December) are boosted so the peak
//! shows up in monthly aggregates.

use chrono::{Datelike, NaiveDate};

/// Relative weight of a holiday-season month against a regular month.
pub const HOLIDAY_BOOST: f64 = 1.7;

/// Sampling weight of a calendar month (1-12).
pub fn seasonal_weight(month: u32) -> f64 {
    match month {
        10..=12 => HOLIDAY_BOOST,
        _ => 1.0,
    }
}

/// Every day in `[start, end]` paired with its seasonal weight.
pub fn weighted_days(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, f64)> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| (day, seasonal_weight(day.month())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q4_months_boosted() {
        for month in 1..=9 {
            assert_eq!(seasonal_weight(month), 1.0, "month {}", month);
        }
        for month in 10..=12 {
            assert_eq!(seasonal_weight(month), HOLIDAY_BOOST, "month {}", month);
        }
    }

    #[test]
    fn test_weighted_days_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 9, 29).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2024, 10, 2).expect("valid date");
        let days = weighted_days(start, end);
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], (start, 1.0));
        assert_eq!(days[3], (end, HOLIDAY_BOOST));
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date");
        assert_eq!(weighted_days(day, day), vec![(day, HOLIDAY_BOOST)]);
    }
}
