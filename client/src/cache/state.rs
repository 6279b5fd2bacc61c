//! Incremental schedule cache.
//!
//! `ScheduleCache` owns everything fetched for the active search context and
//! decides which weeks still need fetching. It performs no I/O: `set_context`
//! returns [`FetchTicket`]s describing the requests to issue, and the results
//! come back through `on_fetch_success` / `on_fetch_failure`.
//!
//! Invariant: every accumulated entry was fetched under the active context.
//! A context switch clears entries, ledger and in-flight bookkeeping before any
//! new ticket is handed out, and tickets issued before the switch are
//! discarded when they complete.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};

use crate::calendar::{Semester, VisibleWeeks};
use crate::fetch::{FetchError, FetchKey, FetchRequest};
use crate::models::{MasterLists, ScheduleEntry, ScheduleResponse, SearchContext, SearchOption, SearchType};

/// An issued request plus the context generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: FetchRequest,
}

impl FetchTicket {
    pub fn key(&self) -> &FetchKey {
        &self.request.key
    }
}

/// What the cache did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// Response merged; `entries` is the number of entries it carried.
    Merged { entries: usize },
    /// Failure recorded as the last error.
    Failed,
    /// Completion belonged to an older context and was dropped.
    Stale,
}

/// Accumulated schedule for one search context.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    active_context: Option<SearchContext>,
    /// Bumped on every context switch; tickets carry the value they were issued under.
    generation: u64,
    entries: Vec<ScheduleEntry>,
    /// Keys already requested for the active context, including failed ones.
    ledger: HashSet<FetchKey>,
    in_flight: HashSet<FetchKey>,
    master_lists: MasterLists,
    is_loading: bool,
    last_error: Option<String>,
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Mutation ====================

    /// Make `context` active and claim every visible week not yet requested.
    ///
    /// # Arguments
    /// * `context` - Search context to show
    /// * `visible` - Weeks currently on screen and their reference date
    /// * `semester` - Semester sent with each request
    ///
    /// # Returns
    /// Tickets for the weeks that must be fetched; empty when everything is
    /// already claimed or the query is empty.
    pub fn set_context(
        &mut self,
        context: SearchContext,
        visible: &VisibleWeeks,
        semester: Semester,
    ) -> Vec<FetchTicket> {
        if self.active_context.as_ref() != Some(&context) {
            info!("Switching schedule context to {}", context);
            self.reset_data();
            self.generation += 1;
            self.active_context = Some(context.clone());
            self.is_loading = true;
            self.last_error = None;
        }

        if !context.has_query() {
            self.reset_data();
            self.is_loading = false;
            return Vec::new();
        }

        let tickets = self.claim(&context, visible, semester);

        if !tickets.is_empty() {
            self.is_loading = true;
        } else if self.in_flight.is_empty() {
            self.is_loading = false;
        }

        tickets
    }

    /// Re-issue the visible weeks of the active context, including weeks
    /// whose earlier fetch failed.
    ///
    /// Entries stay in place until the new responses replace them.
    pub fn refresh(&mut self, visible: &VisibleWeeks, semester: Semester) -> Vec<FetchTicket> {
        let Some(context) = self.active_context.clone() else {
            return Vec::new();
        };
        if !context.has_query() {
            return Vec::new();
        }

        for week in visible.iter() {
            let key = FetchKey::new(context.clone(), week, semester);
            // Requests already on the wire will deliver fresh data anyway.
            if !self.in_flight.contains(&key) {
                self.ledger.remove(&key);
            }
        }

        let tickets = self.claim(&context, visible, semester);
        if !tickets.is_empty() {
            self.is_loading = true;
        }
        tickets
    }

    /// Merge a successful response.
    ///
    /// Existing entries on any date present in the response are replaced, so
    /// re-fetching a week never duplicates its entries. Master lists are
    /// replaced wholesale.
    pub fn on_fetch_success(
        &mut self,
        ticket: &FetchTicket,
        response: ScheduleResponse,
    ) -> FetchDisposition {
        if self.is_stale(ticket) {
            debug!("Discarding stale response for {}", ticket.key());
            return FetchDisposition::Stale;
        }

        self.in_flight.remove(ticket.key());

        let ScheduleResponse {
            schedule,
            master_lists,
        } = response;
        let count = schedule.len();

        let dates: HashSet<NaiveDate> = schedule.iter().map(|e| e.date).collect();
        self.entries.retain(|e| !dates.contains(&e.date));
        self.entries.extend(schedule);

        self.master_lists = master_lists;
        self.last_error = None;
        self.settle_loading();

        debug!(
            "Merged {} entries for {} ({} cached, {} in flight)",
            count,
            ticket.key(),
            self.entries.len(),
            self.in_flight.len()
        );

        FetchDisposition::Merged { entries: count }
    }

    /// Record a failed fetch.
    ///
    /// Entries from other weeks are kept and the key stays claimed in the
    /// ledger, so the week is not fetched again until the context changes or
    /// [`refresh`](Self::refresh) is called.
    pub fn on_fetch_failure(&mut self, ticket: &FetchTicket, error: &FetchError) -> FetchDisposition {
        if self.is_stale(ticket) {
            debug!("Discarding stale failure for {}: {}", ticket.key(), error);
            return FetchDisposition::Stale;
        }

        warn!("Fetch failed for {}: {}", ticket.key(), error);
        self.in_flight.remove(ticket.key());
        self.last_error = Some(error.to_string());
        self.settle_loading();

        FetchDisposition::Failed
    }

    // ==================== Queries ====================

    /// Entries on `date`, in arrival order. Empty for `None`.
    pub fn schedule_for_date(&self, date: impl Into<Option<NaiveDate>>) -> Vec<&ScheduleEntry> {
        match date.into() {
            Some(date) => self.entries.iter().filter(|e| e.date == date).collect(),
            None => Vec::new(),
        }
    }

    /// All entries grouped by date.
    pub fn schedule_by_date(&self) -> BTreeMap<NaiveDate, Vec<&ScheduleEntry>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&ScheduleEntry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.date).or_default().push(entry);
        }
        grouped
    }

    /// Auto-complete options for `search_type` from the latest master lists.
    pub fn search_options(&self, search_type: SearchType) -> &[SearchOption] {
        self.master_lists.options_for(search_type)
    }

    pub fn active_context(&self) -> Option<&SearchContext> {
        self.active_context.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn master_lists(&self) -> &MasterLists {
        &self.master_lists
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether `key` has been requested under the active context.
    pub fn is_claimed(&self, key: &FetchKey) -> bool {
        self.ledger.contains(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// A ticket is stale when it was issued under another context or before
    /// the latest context switch.
    pub fn is_stale(&self, ticket: &FetchTicket) -> bool {
        ticket.generation != self.generation
            || self.active_context.as_ref() != Some(&ticket.key().context)
    }

    // ==================== Internals ====================

    fn claim(
        &mut self,
        context: &SearchContext,
        visible: &VisibleWeeks,
        semester: Semester,
    ) -> Vec<FetchTicket> {
        let mut tickets = Vec::new();
        for (week, start) in visible.iter_starts() {
            let key = FetchKey::new(context.clone(), week, semester);
            if !self.ledger.insert(key.clone()) {
                continue;
            }
            self.in_flight.insert(key.clone());
            debug!("Claimed {} (week starts {})", key, start);
            tickets.push(FetchTicket {
                generation: self.generation,
                request: FetchRequest::new(key, start),
            });
        }
        tickets
    }

    fn reset_data(&mut self) {
        self.entries.clear();
        self.ledger.clear();
        self.in_flight.clear();
    }

    fn settle_loading(&mut self) {
        if self.in_flight.is_empty() {
            self.is_loading = false;
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
