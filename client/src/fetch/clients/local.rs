//! In-memory fetch client for testing and offline development.
//!
//! Serves requests from a local store of entries the same way the remote API
//! does: the week starting at `startDateOfWeek`, filtered by the search
//! context, with master lists derived from everything in the store.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use log::debug;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::watch;

use crate::calendar::AcademicWeekNumber;
use crate::fetch::client::FetchClient;
use crate::fetch::error::{FetchError, FetchResult};
use crate::fetch::request::FetchRequest;
use crate::models::{MasterLists, ScheduleEntry, ScheduleResponse, SearchOption};

#[derive(Default)]
struct LocalStore {
    entries: Vec<ScheduleEntry>,
    requests: Vec<FetchRequest>,
    failing_weeks: HashSet<AcademicWeekNumber>,
    gates: HashMap<AcademicWeekNumber, watch::Sender<bool>>,
}

/// In-memory [`FetchClient`].
///
/// Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct LocalFetchClient {
    store: Arc<RwLock<LocalStore>>,
}

impl LocalFetchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client pre-loaded with `entries`.
    pub fn with_entries(entries: impl IntoIterator<Item = ScheduleEntry>) -> Self {
        let client = Self::new();
        client.insert_entries(entries);
        client
    }

    pub fn insert_entries(&self, entries: impl IntoIterator<Item = ScheduleEntry>) {
        self.store.write().entries.extend(entries);
    }

    /// Replace every stored entry on `date` with `entries`.
    pub fn replace_day(&self, date: NaiveDate, entries: impl IntoIterator<Item = ScheduleEntry>) {
        let mut store = self.store.write();
        store.entries.retain(|e| e.date != date);
        store.entries.extend(entries);
    }

    /// Requests served so far, in arrival order.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.store.read().requests.clone()
    }

    /// Weeks requested so far, in arrival order.
    pub fn requested_weeks(&self) -> Vec<AcademicWeekNumber> {
        self.store.read().requests.iter().map(|r| r.week()).collect()
    }

    /// Make every request for `week` fail with a transport error.
    pub fn fail_week(&self, week: AcademicWeekNumber) {
        self.store.write().failing_weeks.insert(week);
    }

    pub fn recover_week(&self, week: AcademicWeekNumber) {
        self.store.write().failing_weeks.remove(&week);
    }

    /// Park requests for `week` until [`release_week`](Self::release_week).
    pub fn hold_week(&self, week: AcademicWeekNumber) {
        let (tx, _rx) = watch::channel(false);
        self.store.write().gates.insert(week, tx);
    }

    /// Let parked and future requests for `week` through.
    pub fn release_week(&self, week: AcademicWeekNumber) {
        if let Some(gate) = self.store.write().gates.remove(&week) {
            gate.send_replace(true);
        }
    }

    fn master_lists(entries: &[ScheduleEntry]) -> MasterLists {
        let mut groups = BTreeSet::new();
        let mut teachers = BTreeSet::new();
        let mut rooms = BTreeSet::new();
        for entry in entries {
            groups.extend(entry.groups().map(str::to_string));
            teachers.insert(entry.teacher.clone());
            rooms.insert(entry.room.clone());
        }
        let to_options = |set: BTreeSet<String>| -> Option<Vec<SearchOption>> {
            Some(set.into_iter().map(SearchOption::named).collect())
        };
        MasterLists {
            group: to_options(groups),
            teacher: to_options(teachers),
            office: to_options(rooms),
        }
    }
}

#[async_trait]
impl FetchClient for LocalFetchClient {
    async fn fetch_week(&self, request: &FetchRequest) -> FetchResult<ScheduleResponse> {
        let gate = {
            let mut store = self.store.write();
            store.requests.push(request.clone());
            store.gates.get(&request.week()).map(|tx| tx.subscribe())
        };

        if let Some(mut gate) = gate {
            debug!("Holding local request {}", request.key);
            // A dropped sender means the gate was released.
            let _ = gate.wait_for(|released| *released).await;
        }

        let store = self.store.read();
        if store.failing_weeks.contains(&request.week()) {
            return Err(FetchError::transport("local client: injected failure")
                .with_operation("fetch_week")
                .for_request(request.context(), request.week()));
        }

        let start = request.start_date_of_week;
        let end = start + Days::new(6);
        let context = request.context();
        let schedule = store
            .entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .filter(|e| e.matches(context.search_type, &context.query))
            .cloned()
            .collect();

        Ok(ScheduleResponse {
            schedule,
            master_lists: Self::master_lists(&store.entries),
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
