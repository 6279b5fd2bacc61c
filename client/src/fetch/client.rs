//! Fetch client trait.
//!
//! A client performs the network request for one (context, week) pair. The
//! cache never talks to the network directly; it hands [`FetchRequest`]s to a
//! client and consumes the results.

use async_trait::async_trait;

use super::error::FetchResult;
use super::request::FetchRequest;
use crate::models::ScheduleResponse;

/// Schedule source for one academic week.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`: each request runs in its own task.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetch the schedule and master lists for one week.
    ///
    /// # Returns
    /// * `Ok(ScheduleResponse)` - Entries for the week plus current master lists
    /// * `Err(FetchError)` - Transport, protocol or schema failure
    async fn fetch_week(&self, request: &FetchRequest) -> FetchResult<ScheduleResponse>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
