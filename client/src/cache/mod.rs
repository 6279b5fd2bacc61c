//! Incremental schedule cache and its async driver.

pub mod coordinator;
pub mod state;

pub use coordinator::{FetchOutcome, ScheduleCoordinator};
pub use state::{FetchDisposition, FetchTicket, ScheduleCache};
