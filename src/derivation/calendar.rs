//! Gregorian calendar helpers for derived fields.

use chrono::{Datelike, NaiveDate};

/// Quarter (1-4) of a month (1-12).
pub fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Label such as `2024-Q1`.
pub fn year_quarter_label(year: i32, quarter: u32) -> String {
    format!("{}-Q{}", year, quarter)
}

/// Full English month name, e.g. `March`.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Full English weekday name, e.g. `Friday`.
pub fn day_of_week(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Calendar parts of an order date: `(year, month, quarter)`.
pub fn calendar_parts(date: NaiveDate) -> (i32, u32, u32) {
    let month = date.month();
    (date.year(), month, quarter_of(month))
}
