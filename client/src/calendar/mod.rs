//! Academic calendar: week numbering and visible-week resolution.
//!
//! - [`academic`]: dates ⇄ academic week numbers, anchors, semesters
//! - [`visible`]: the set of academic weeks a viewport displays

pub mod academic;
pub mod visible;

pub use academic::{
    academic_year_anchor, effective_anchor, start_of_week, week_days, week_info,
    week_number_of, week_start_date, AcademicWeekInfo, AcademicWeekNumber, Semester,
};
pub use visible::{visible_weeks, GridOrigin, Viewport, VisibleWeeks};
