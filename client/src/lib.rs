//! # Orar Schedule Client
//!
//! Academic calendar arithmetic and an incremental schedule cache for a
//! university timetable service.
//!
//! ## Features
//!
//! - **Academic Weeks**: Map dates to academic week numbers anchored on the
//!   first Monday of September, and back
//! - **Visible Weeks**: Resolve which weeks a week view or month grid shows
//! - **Incremental Fetching**: Request only weeks not yet fetched for the
//!   active search, discarding responses that belong to an earlier search
//! - **Pluggable Clients**: HTTP client for the schedule API, in-memory
//!   client for tests and offline use
//!
//! ## Architecture
//!
//! - [`models`]: Wire types (entries, master lists, search contexts)
//! - [`calendar`]: Academic week numbering and visible-week resolution
//! - [`fetch`]: `FetchClient` trait, implementations, config and errors
//! - [`cache`]: `ScheduleCache` state machine and its async coordinator
//! - [`services`]: Views built from cached data
//!

pub mod cache;
pub mod calendar;
pub mod fetch;
pub mod models;
pub mod services;
