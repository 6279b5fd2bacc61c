//! Schedule wire types.
//!
//! These mirror the JSON returned by the schedule API. Field names on the wire
//! keep the API's spelling (`professor`, `classroom`, `masterLists`, ...);
//! the Rust names describe what the field holds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::search::SearchType;

/// Kind of teaching session.
///
/// Known values map to dedicated variants; anything else is preserved
/// verbatim in [`SessionKind::Other`] so the wire string always round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionKind {
    Lecture,
    Seminar,
    Practice,
    Laboratory,
    CourseProject,
    PeriodicEvaluation,
    Consultation,
    Examination,
    Reexamination,
    PreliminarySeminar,
    SummarySeminar,
    Other(String),
}

impl SessionKind {
    /// Wire spelling.
    pub fn as_str(&self) -> &str {
        match self {
            SessionKind::Lecture => "Prelegere",
            SessionKind::Seminar => "Seminar",
            SessionKind::Practice => "Practică",
            SessionKind::Laboratory => "Laborator",
            SessionKind::CourseProject => "Proiect de Curs",
            SessionKind::PeriodicEvaluation => "Evaluare periodică",
            SessionKind::Consultation => "Consultație",
            SessionKind::Examination => "Examinare",
            SessionKind::Reexamination => "Reexaminare",
            SessionKind::PreliminarySeminar => "Seminar prealabil",
            SessionKind::SummarySeminar => "Seminar de totalizare",
            SessionKind::Other(raw) => raw,
        }
    }

    /// Short code used in the weekly grid. Practice sessions share the
    /// seminar code; unknown kinds render as `?`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "P",
            SessionKind::Seminar | SessionKind::Practice => "S",
            SessionKind::Laboratory => "L",
            SessionKind::CourseProject => "PC",
            SessionKind::PeriodicEvaluation => "EP",
            SessionKind::Consultation => "C",
            SessionKind::Examination => "E",
            SessionKind::Reexamination => "R",
            SessionKind::PreliminarySeminar => "SP",
            SessionKind::SummarySeminar => "ST",
            SessionKind::Other(_) => "?",
        }
    }
}

impl From<String> for SessionKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Prelegere" => SessionKind::Lecture,
            "Seminar" => SessionKind::Seminar,
            "Practică" => SessionKind::Practice,
            "Laborator" => SessionKind::Laboratory,
            "Proiect de Curs" => SessionKind::CourseProject,
            "Evaluare periodică" => SessionKind::PeriodicEvaluation,
            "Consultație" => SessionKind::Consultation,
            "Examinare" => SessionKind::Examination,
            "Reexaminare" => SessionKind::Reexamination,
            "Seminar prealabil" => SessionKind::PreliminarySeminar,
            "Seminar de totalizare" => SessionKind::SummarySeminar,
            _ => SessionKind::Other(raw),
        }
    }
}

impl From<SessionKind> for String {
    fn from(kind: SessionKind) -> Self {
        match kind {
            SessionKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scheduled session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day of the session, `YYYY-MM-DD` on the wire
    pub date: NaiveDate,
    /// Start of the time slot, e.g. `08:00`
    pub time: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    #[serde(rename = "professor")]
    pub teacher: String,
    /// Color tag assigned to the teacher by the server
    #[serde(rename = "professorColor", default)]
    pub teacher_color: String,
    #[serde(rename = "classroom")]
    pub room: String,
    /// One group, or several joined with `", "`
    pub group: String,
}

impl ScheduleEntry {
    /// Individual group names of a session shared by several groups.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.group.split(',').map(str::trim).filter(|g| !g.is_empty())
    }

    /// Whether this entry belongs to `query` under `search_type`.
    pub fn matches(&self, search_type: SearchType, query: &str) -> bool {
        match search_type {
            SearchType::Group => self.group == query || self.groups().any(|g| g == query),
            SearchType::Teacher => self.teacher == query,
            SearchType::Room => self.room == query,
        }
    }
}

/// Auto-complete option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SearchOption {
    pub id: String,
    pub name: String,
}

impl SearchOption {
    /// Option whose id and display name are the same value.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}

/// Distinct known groups, teachers and rooms, as last reported by the server.
///
/// Each list is `null` on the wire until the server has one to offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterLists {
    #[serde(default)]
    pub group: Option<Vec<SearchOption>>,
    #[serde(default)]
    pub teacher: Option<Vec<SearchOption>>,
    #[serde(default)]
    pub office: Option<Vec<SearchOption>>,
}

impl MasterLists {
    /// Options for one search category; empty when the list is unknown.
    pub fn options_for(&self, search_type: SearchType) -> &[SearchOption] {
        let list = match search_type {
            SearchType::Group => &self.group,
            SearchType::Teacher => &self.teacher,
            SearchType::Room => &self.office,
        };
        list.as_deref().unwrap_or(&[])
    }
}

/// Body of a successful schedule response.
///
/// Both fields are required; a body missing either is a schema failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleEntry>,
    #[serde(rename = "masterLists")]
    pub master_lists: MasterLists,
}
