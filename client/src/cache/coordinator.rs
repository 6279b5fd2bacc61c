//! Async driver around [`ScheduleCache`].
//!
//! Each ticket handed out by the cache is fetched in its own tokio task. The
//! task never touches the cache: it sends a [`FetchOutcome`] back over a
//! channel, and the owner of the coordinator applies outcomes one at a time
//! through `&mut self`. Completions may therefore arrive in any order while
//! cache state stays single-owner. A fetch that panics is reported as a
//! transport failure so its key never stays in flight.
//!
//! Methods that issue fetches must be called from within a tokio runtime.

use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::state::{FetchDisposition, FetchTicket, ScheduleCache};
use crate::calendar::{Semester, VisibleWeeks};
use crate::fetch::{FetchClient, FetchError, FetchResult};
use crate::models::{ScheduleResponse, SearchContext};

/// Completion message for one issued ticket.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: FetchResult<ScheduleResponse>,
}

/// Owns a [`ScheduleCache`] and runs its fetches.
pub struct ScheduleCoordinator {
    cache: ScheduleCache,
    client: Arc<dyn FetchClient>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl ScheduleCoordinator {
    pub fn new(client: Arc<dyn FetchClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            cache: ScheduleCache::new(),
            client,
            tx,
            rx,
        }
    }

    pub fn cache(&self) -> &ScheduleCache {
        &self.cache
    }

    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    /// Activate `context` for `visible` and start fetching missing weeks.
    ///
    /// # Returns
    /// Number of fetches started.
    pub fn set_context(
        &mut self,
        context: SearchContext,
        visible: &VisibleWeeks,
        semester: Semester,
    ) -> usize {
        let tickets = self.cache.set_context(context, visible, semester);
        self.spawn_all(tickets)
    }

    /// Re-fetch the visible weeks of the active context.
    pub fn refresh(&mut self, visible: &VisibleWeeks, semester: Semester) -> usize {
        let tickets = self.cache.refresh(visible, semester);
        self.spawn_all(tickets)
    }

    /// Apply one completion to the cache.
    pub fn apply(&mut self, outcome: FetchOutcome) -> FetchDisposition {
        let FetchOutcome { ticket, result } = outcome;
        match result {
            Ok(response) => self.cache.on_fetch_success(&ticket, response),
            Err(err) => self.cache.on_fetch_failure(&ticket, &err),
        }
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `None` only if the channel is closed, which cannot happen
    /// while the coordinator holds its own sender.
    pub async fn process_next(&mut self) -> Option<FetchDisposition> {
        let outcome = self.rx.recv().await?;
        Some(self.apply(outcome))
    }

    /// Apply every completion that has already arrived without waiting.
    ///
    /// # Returns
    /// Number of outcomes applied.
    pub fn process_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Apply completions until no fetch for the active context is in flight.
    ///
    /// Stale completions arriving meanwhile are applied (and dropped) too.
    pub async fn settle(&mut self) {
        while self.cache.in_flight_count() > 0 {
            if self.process_next().await.is_none() {
                break;
            }
        }
    }

    fn spawn_all(&self, tickets: Vec<FetchTicket>) -> usize {
        let count = tickets.len();
        for ticket in tickets {
            self.spawn_fetch(ticket);
        }
        count
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        debug!("Spawning {} fetch for {}", client.name(), ticket.key());

        tokio::spawn(async move {
            let request = ticket.request.clone();
            let fetch = tokio::spawn(async move { client.fetch_week(&request).await });
            // A panicked or cancelled fetch still has to release its key.
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Fetch task for {} failed: {}", ticket.key(), e);
                    Err(FetchError::transport(format!("fetch task failed: {}", e)))
                }
            };
            if tx.send(FetchOutcome { ticket, result }).is_err() {
                debug!("Coordinator gone, dropping result");
            }
        });
    }
}
