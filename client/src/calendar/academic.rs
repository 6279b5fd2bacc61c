//! Academic-week arithmetic.
//!
//! Week 1 of an academic year starts on the anchor Monday: September 1 when it
//! is a Monday, otherwise the first Monday after it. A date whose Monday falls
//! before this calendar year's anchor belongs to the academic year that began
//! in the previous calendar year. All arithmetic is on whole days.

use chrono::{Datelike, Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based week index relative to an academic-year anchor.
pub type AcademicWeekNumber = u32;

/// Monday that begins week 1 of the academic year starting in `year`.
pub fn academic_year_anchor(year: i32) -> NaiveDate {
    // Only fails outside chrono's representable range.
    let september_first = NaiveDate::from_ymd_opt(year, 9, 1).unwrap_or(NaiveDate::MIN);
    let days_to_monday = (7 - september_first.weekday().num_days_from_monday()) % 7;
    september_first + Days::new(u64::from(days_to_monday))
}

/// Monday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Anchor of the academic year that `date` belongs to.
pub fn effective_anchor(date: NaiveDate) -> NaiveDate {
    let monday = start_of_week(date);
    let anchor = academic_year_anchor(date.year());
    if monday < anchor {
        academic_year_anchor(date.year() - 1)
    } else {
        anchor
    }
}

/// Academic week number of `date`.
pub fn week_number_of(date: NaiveDate) -> AcademicWeekNumber {
    let monday = start_of_week(date);
    let days = (monday - effective_anchor(date)).num_days();
    // `monday` never precedes the effective anchor.
    (days.max(0) / 7) as AcademicWeekNumber + 1
}

/// Monday of academic week `week` in the academic year of `reference_date`.
///
/// Week 0 resolves to the Monday before the anchor. `None` when the result
/// falls outside chrono's date range.
pub fn week_start_date(week: AcademicWeekNumber, reference_date: NaiveDate) -> Option<NaiveDate> {
    let anchor = effective_anchor(reference_date);
    let offset_days = 7 * (i64::from(week) - 1);
    anchor.checked_add_signed(Duration::try_days(offset_days)?)
}

/// Week number together with the Monday starting that week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicWeekInfo {
    pub week_number: AcademicWeekNumber,
    pub start_date: NaiveDate,
}

/// Week number and Monday of the week containing `date`.
pub fn week_info(date: NaiveDate) -> AcademicWeekInfo {
    AcademicWeekInfo {
        week_number: week_number_of(date),
        start_date: start_of_week(date),
    }
}

/// Monday through Sunday of the week containing `date`.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = start_of_week(date);
    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = monday + Days::new(offset as u64);
    }
    days
}

/// Half of the academic year, sent to the API as `sem=1|2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn value(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }

    /// September through January is the first semester, February through
    /// August the second.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            9..=12 | 1 => Semester::First,
            _ => Semester::Second,
        }
    }
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::First),
            2 => Ok(Semester::Second),
            other => Err(format!("Semester must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester.value()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
#[path = "academic_tests.rs"]
mod academic_tests;
