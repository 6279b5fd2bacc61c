//! Search categories and the active search context.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a schedule is browsed by.
///
/// Serialized with the API's parameter names (`grupe`, `profesori`, `aule`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SearchType {
    #[serde(rename = "grupe")]
    Group,
    #[serde(rename = "profesori")]
    Teacher,
    #[serde(rename = "aule")]
    Room,
}

impl SearchType {
    /// Query parameter carrying the search query for this category.
    pub fn query_param(self) -> &'static str {
        match self {
            SearchType::Group => "grupe",
            SearchType::Teacher => "profesori",
            SearchType::Room => "aule",
        }
    }

    /// Query shown before the user has picked anything for this category.
    pub fn default_query(self) -> &'static str {
        match self {
            SearchType::Group => "IA-211",
            SearchType::Teacher => "Popescu Ion",
            SearchType::Room => "501",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_param())
    }
}

impl FromStr for SearchType {
    type Err = String;

    /// Accepts the API names as well as the English ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grupe" | "group" | "groups" => Ok(Self::Group),
            "profesori" | "teacher" | "teachers" | "professor" => Ok(Self::Teacher),
            "aule" | "room" | "rooms" | "office" | "classroom" => Ok(Self::Room),
            _ => Err(format!("Unknown search type: {}", s)),
        }
    }
}

/// The (category, query) pair currently filtering the schedule.
///
/// Two contexts are equal iff both fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchContext {
    pub search_type: SearchType,
    pub query: String,
}

impl SearchContext {
    pub fn new(search_type: SearchType, query: impl Into<String>) -> Self {
        Self {
            search_type,
            query: query.into(),
        }
    }

    /// Context holding the category's default query.
    pub fn with_default_query(search_type: SearchType) -> Self {
        Self::new(search_type, search_type.default_query())
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

impl fmt::Display for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.search_type, self.query)
    }
}
