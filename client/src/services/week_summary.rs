//! Weekly summary grid.
//!
//! One row per day of the academic week containing a date, one column per
//! teaching slot. A cell holds the first session on that day whose start time
//! begins with the slot time.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::ScheduleCache;
use crate::calendar::{week_days, week_info, AcademicWeekInfo};
use crate::models::ScheduleEntry;

/// Start times of the daily teaching slots.
pub const TIME_SLOTS: [&str; 7] = ["08:00", "09:45", "11:30", "13:15", "15:00", "16:45", "18:30"];

/// A filled cell of the summary grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCell {
    pub abbreviation: &'static str,
    pub subject: String,
    pub teacher_color: String,
}

impl SummaryCell {
    fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            abbreviation: entry.kind.abbreviation(),
            subject: entry.subject.clone(),
            teacher_color: entry.teacher_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDay {
    pub date: NaiveDate,
    pub slots: [Option<SummaryCell>; TIME_SLOTS.len()],
}

impl SummaryDay {
    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Monday to Sunday summary of the week containing a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    pub week: AcademicWeekInfo,
    pub days: Vec<SummaryDay>,
}

impl WeekSummary {
    /// Build the summary for the week containing `date` from cached entries.
    pub fn build(cache: &ScheduleCache, date: NaiveDate) -> Self {
        let days = week_days(date)
            .into_iter()
            .map(|day| {
                let entries = cache.schedule_for_date(day);
                SummaryDay {
                    date: day,
                    slots: TIME_SLOTS.map(|slot| {
                        entries
                            .iter()
                            .find(|e| e.time.starts_with(slot))
                            .map(|e| SummaryCell::from_entry(e))
                    }),
                }
            })
            .collect();

        Self {
            week: week_info(date),
            days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.occupied() == 0)
    }

    /// Abbreviation rows, `-` for free slots.
    pub fn render_rows(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|day| {
                let cells: Vec<&str> = day
                    .slots
                    .iter()
                    .map(|slot| slot.as_ref().map_or("-", |c| c.abbreviation))
                    .collect();
                format!("{} {}", day.date.format("%a %d.%m"), cells.join(" "))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "week_summary_tests.rs"]
mod week_summary_tests;
