//! Task and history model for the sticky board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
    Skipped,
}

impl TaskStatus {
    /// Only Pending -> Done and Pending -> Skipped are legal transitions.
    pub fn is_final(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Skipped)
    }
}

/// Core task type.
///
/// Note: we keep this small + serializable. Storage is a later layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,

    /// Always a member of the canonical label set at assignment time.
    pub category: String,
    pub status: TaskStatus,

    pub created_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
            status: TaskStatus::Pending,
            created_at,
            due_at: None,
        }
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Snapshot of a finalized task, grouped under the local day it was finished.
///
/// Immutable once written, except category rename propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub task_id: String,
    pub text: String,
    pub category: String,
    pub status: TaskStatus,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Skipped).unwrap(), "\"skipped\"");
        assert_eq!(serde_json::to_string(&TaskStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn task_json_round_trips() {
        let t = Task::new("t1", "buy milk", "Groceries", Utc::now()).with_due(Utc::now());
        let json = serde_json::to_string(&t).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
