//! sticky-core: pure logic for the sticky board.
//!
//! Everything here is a stateless function over (current state, current
//! instant): no I/O, no clocks, no globals. The CLI crate owns storage,
//! config, the LLM classifier, and alarm delivery.

pub mod board;
pub mod category;
pub mod classify;
pub mod due;
pub mod heuristic;
pub mod reminder;
pub mod task;
pub mod time;

pub use board::Board;
pub use category::{DEFAULT_CATEGORY, canonicalize, levenshtein, normalize};
pub use classify::{ClassifierOutcome, MAX_CLASSIFIER_CONTEXT, assign_category};
pub use due::parse_due;
pub use heuristic::heuristic_category;
pub use reminder::{Alarm, DEFAULT_SNOOZE_MINUTES, alarm_for, alarm_key, snooze};
pub use task::{HistoryEntry, Task, TaskStatus};
pub use time::{day_key, resolve_tz};
