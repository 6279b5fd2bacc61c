//! Request identity and wire parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::{AcademicWeekNumber, Semester};
use crate::models::{format_day, SearchContext};

/// Identity of one (context, week, semester) fetch.
///
/// Doubles as the de-duplication ledger key in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchKey {
    pub context: SearchContext,
    pub week: AcademicWeekNumber,
    pub semester: Semester,
}

impl FetchKey {
    pub fn new(context: SearchContext, week: AcademicWeekNumber, semester: Semester) -> Self {
        Self {
            context,
            week,
            semester,
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:w{}:s{}",
            self.context.search_type, self.context.query, self.week, self.semester
        )
    }
}

/// A fetch as handed to a [`FetchClient`](super::FetchClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub key: FetchKey,
    /// Monday of the requested academic week
    pub start_date_of_week: NaiveDate,
}

impl FetchRequest {
    pub fn new(key: FetchKey, start_date_of_week: NaiveDate) -> Self {
        Self {
            key,
            start_date_of_week,
        }
    }

    pub fn week(&self) -> AcademicWeekNumber {
        self.key.week
    }

    pub fn context(&self) -> &SearchContext {
        &self.key.context
    }

    /// Query string parameters:
    /// `week`, `sem`, `startDateOfWeek` and `<grupe|profesori|aule>=<query>`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("week", self.key.week.to_string()),
            ("sem", self.key.semester.to_string()),
            ("startDateOfWeek", format_day(self.start_date_of_week)),
            (
                self.key.context.search_type.query_param(),
                self.key.context.query.clone(),
            ),
        ]
    }
}
