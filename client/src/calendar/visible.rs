//! Visible academic weeks for a calendar viewport.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::academic::{start_of_week, week_number_of, week_start_date, AcademicWeekNumber};

/// Where the displayed grid begins relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridOrigin {
    /// First day of the reference date's month (month grid)
    MonthStart,
    /// The reference date itself (week and day views)
    Reference,
}

/// A displayed range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: GridOrigin,
    pub days: u32,
}

impl Viewport {
    /// Six-week month grid.
    pub const MONTH_GRID_DAYS: u32 = 42;

    pub fn month_grid() -> Self {
        Self {
            origin: GridOrigin::MonthStart,
            days: Self::MONTH_GRID_DAYS,
        }
    }

    pub fn week() -> Self {
        Self {
            origin: GridOrigin::Reference,
            days: 7,
        }
    }

    /// First displayed day: the Monday on or before the grid's first day.
    pub fn start(&self, reference_date: NaiveDate) -> NaiveDate {
        let first_day = match self.origin {
            GridOrigin::MonthStart => reference_date.with_day(1).unwrap_or(reference_date),
            GridOrigin::Reference => reference_date,
        };
        start_of_week(first_day)
    }

    /// Every displayed day, in order. Empty for a zero-day viewport.
    pub fn dates(&self, reference_date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let start = self.start(reference_date);
        (0..u64::from(self.days)).map(move |offset| start + Days::new(offset))
    }
}

/// Distinct academic weeks visible for a reference date, each with the Monday
/// it starts on.
///
/// A month grid can straddle the start of an academic year, so a week's
/// Monday is recorded from the displayed dates rather than recomputed from the
/// reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWeeks {
    pub reference_date: NaiveDate,
    weeks: BTreeMap<AcademicWeekNumber, NaiveDate>,
}

impl VisibleWeeks {
    /// Weeks of the academic year containing `reference_date`.
    ///
    /// Weeks whose Monday falls outside the representable date range are
    /// skipped.
    pub fn new(
        reference_date: NaiveDate,
        weeks: impl IntoIterator<Item = AcademicWeekNumber>,
    ) -> Self {
        Self {
            reference_date,
            weeks: weeks
                .into_iter()
                .filter_map(|week| Some((week, week_start_date(week, reference_date)?)))
                .collect(),
        }
    }

    /// Weeks containing `dates`.
    pub fn from_dates(reference_date: NaiveDate, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            reference_date,
            weeks: dates
                .into_iter()
                .map(|date| (week_number_of(date), start_of_week(date)))
                .collect(),
        }
    }

    pub fn contains(&self, week: AcademicWeekNumber) -> bool {
        self.weeks.contains_key(&week)
    }

    /// Monday of a visible `week`.
    pub fn start_date(&self, week: AcademicWeekNumber) -> Option<NaiveDate> {
        self.weeks.get(&week).copied()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Week numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = AcademicWeekNumber> + '_ {
        self.weeks.keys().copied()
    }

    /// `(week, monday)` pairs in ascending week order.
    pub fn iter_starts(&self) -> impl Iterator<Item = (AcademicWeekNumber, NaiveDate)> + '_ {
        self.weeks.iter().map(|(week, start)| (*week, *start))
    }
}

/// Academic weeks touched by `viewport` around `reference_date`.
pub fn visible_weeks(reference_date: NaiveDate, viewport: Viewport) -> VisibleWeeks {
    VisibleWeeks::from_dates(reference_date, viewport.dates(reference_date))
}
