//! Views derived from the schedule cache.

pub mod week_summary;

pub use week_summary::{SummaryCell, SummaryDay, WeekSummary, TIME_SLOTS};
