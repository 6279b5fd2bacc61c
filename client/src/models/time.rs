//! Day-granularity date helpers.
//!
//! Every date that crosses the cache boundary travels as `YYYY-MM-DD` with no
//! time or timezone component. That string is the join key between schedule
//! entries and calendar dates.

use chrono::NaiveDate;

/// Wire format for calendar dates.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `YYYY-MM-DD`.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string. Surrounding whitespace is ignored.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
