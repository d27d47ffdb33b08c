//! Board: the whole-state object, active tasks plus date-keyed history.
//!
//! Every operation takes the full state, mutates it, and leaves it ready to
//! be written back in full. No partial ownership: callers read the board,
//! apply exactly one operation per external event, persist, re-render.
//! Lookup misses (finalize/delete/rename on something already gone) are
//! silent no-ops.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::category::canonicalize;
use crate::task::{HistoryEntry, Task, TaskStatus};
use crate::time::day_key;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub active: Vec<Task>,

    /// Local day key (`YYYY-MM-DD`) -> finalized entries, newest first.
    #[serde(default)]
    pub history: BTreeMap<String, Vec<HistoryEntry>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new task onto the board, newest first.
    pub fn add(&mut self, task: Task) {
        self.active.insert(0, task);
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.active.iter().find(|t| t.id == id)
    }

    /// Resolve a full id or a unique id prefix. Ambiguous or unknown -> None.
    pub fn resolve_id(&self, prefix: &str) -> Option<String> {
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self.active.iter().filter(|t| t.id.starts_with(prefix));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id.clone())
    }

    /// Move a task out of the active list into today's history bucket.
    ///
    /// Only Pending -> Done / Skipped transitions exist; anything else is a
    /// no-op, as is an id that no longer exists. Returns the written entry.
    pub fn finalize(
        &mut self,
        id: &str,
        status: TaskStatus,
        now_local: DateTime<Tz>,
    ) -> Option<HistoryEntry> {
        if !status.is_final() {
            return None;
        }
        let idx = self.active.iter().position(|t| t.id == id)?;
        let task = self.active.remove(idx);

        let entry = HistoryEntry {
            task_id: task.id,
            text: task.text,
            category: task.category,
            status,
            finished_at: now_local.with_timezone(&Utc),
        };
        self.history
            .entry(day_key(now_local))
            .or_default()
            .insert(0, entry.clone());
        Some(entry)
    }

    /// Remove a task outright. Unknown id -> no-op. Returns whether anything
    /// was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        self.active.len() != before
    }

    /// Rename a category across active tasks and history.
    ///
    /// The new label is canonicalized against the current category set first,
    /// so a rename can deliberately merge two categories. Renaming to the
    /// same canonical label is a no-op. Returns the canonical new label.
    pub fn rename_category(&mut self, old: &str, new_raw: &str) -> Option<String> {
        let existing = self.distinct_categories();
        let new_cat = canonicalize(new_raw.trim(), &existing);
        if new_cat == old {
            return None;
        }

        for t in &mut self.active {
            if t.category == old {
                t.category = new_cat.clone();
            }
        }
        for entries in self.history.values_mut() {
            for e in entries {
                if e.category == old {
                    e.category = new_cat.clone();
                }
            }
        }
        Some(new_cat)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Distinct active-task categories in first-seen order. This is the
    /// existing set fed to the canonicalizer and (capped) to the classifier.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.active {
            if !out.contains(&t.category) {
                out.push(t.category.clone());
            }
        }
        out
    }

    /// Active tasks due on the next local calendar day (the "tomorrow strip").
    pub fn due_tomorrow(&self, now_local: DateTime<Tz>) -> Vec<&Task> {
        let Some(tomorrow) = now_local.date_naive().succ_opt() else {
            return Vec::new();
        };
        let tz = now_local.timezone();
        self.active
            .iter()
            .filter(|t| {
                t.due_at
                    .map(|d| d.with_timezone(&tz).date_naive() == tomorrow)
                    .unwrap_or(false)
            })
            .collect()
    }
}
