//! One-shot reminder alarms, keyed per task.
//!
//! The key is stable (`task:<id>`), so scheduling again under the same key
//! replaces the previous alarm, so last write wins. That is the whole
//! cancellation story: there is none, only supersession.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub const DEFAULT_SNOOZE_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub key: String,
    pub task_id: String,
    pub fire_at: DateTime<Utc>,
}

pub fn alarm_key(task_id: &str) -> String {
    format!("task:{task_id}")
}

/// Alarm at the task's due time, if it has one.
pub fn alarm_for(task: &Task) -> Option<Alarm> {
    let due_at = task.due_at?;
    Some(Alarm {
        key: alarm_key(&task.id),
        task_id: task.id.clone(),
        fire_at: due_at,
    })
}

/// Replacement alarm `minutes` from now under the task's usual key.
/// Zero or negative minutes falls back to the 5-minute default.
pub fn snooze(task_id: &str, minutes: i64, now: DateTime<Utc>) -> Alarm {
    let minutes = if minutes <= 0 {
        DEFAULT_SNOOZE_MINUTES
    } else {
        minutes
    };
    Alarm {
        key: alarm_key(task_id),
        task_id: task_id.to_string(),
        fire_at: now + Duration::minutes(minutes),
    }
}
