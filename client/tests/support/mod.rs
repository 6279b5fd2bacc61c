#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use orar_rust::models::{ScheduleEntry, SessionKind};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily changed.
///
/// Variables are restored on unwind, and calls are serialized because the
/// environment is process-global.
///
/// `changes` holds `(key, value)` pairs: `Some(v)` sets, `None` removes.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// ==================== Fixtures ====================

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// A lecture for group IA-211 taught by Popescu Ion in room 501.
pub fn lecture(date: NaiveDate, time: &str, subject: &str) -> ScheduleEntry {
    ScheduleEntry {
        date,
        time: time.to_string(),
        subject: subject.to_string(),
        kind: SessionKind::Lecture,
        teacher: "Popescu Ion".to_string(),
        teacher_color: "#3366cc".to_string(),
        room: "501".to_string(),
        group: "IA-211".to_string(),
    }
}

/// Same as [`lecture`] with another group, teacher and room.
pub fn lab(date: NaiveDate, time: &str, subject: &str, group: &str) -> ScheduleEntry {
    ScheduleEntry {
        kind: SessionKind::Laboratory,
        teacher: "Rusu Ana".to_string(),
        teacher_color: "#cc6633".to_string(),
        room: "3-12".to_string(),
        group: group.to_string(),
        ..lecture(date, time, subject)
    }
}
