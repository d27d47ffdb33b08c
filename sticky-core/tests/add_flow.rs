//! End-to-end add flow over the pure core: categorize -> canonicalize ->
//! parse due -> board mutation, with no classifier configured.

use chrono::{TimeZone, Utc};
use chrono_tz::America::Chicago;
use sticky_core::{Board, ClassifierOutcome, Task, TaskStatus, alarm_for, assign_category, parse_due};

#[test]
fn add_task_with_empty_board_and_no_classifier() {
    let now_local = Chicago.with_ymd_and_hms(2026, 2, 19, 8, 30, 0).unwrap();
    let text = "reply to boss email tomorrow 9am";

    let mut board = Board::new();
    let existing = board.distinct_categories();
    assert!(existing.is_empty());

    let category = assign_category(text, &existing, ClassifierOutcome::Unavailable);
    assert_eq!(category, "Work");

    let due = parse_due(text, now_local).expect("text carries a due phrase");
    assert_eq!(due, Chicago.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap());

    let task = Task::new("t1", text, category, now_local.with_timezone(&Utc))
        .with_due(due.with_timezone(&Utc));
    let alarm = alarm_for(&task).expect("due task gets an alarm");
    assert_eq!(alarm.key, "task:t1");
    assert_eq!(alarm.fire_at, due.with_timezone(&Utc));

    board.add(task);
    assert_eq!(board.active.len(), 1);
    assert_eq!(board.active[0].category, "Work");
    assert_eq!(board.active[0].status, TaskStatus::Pending);

    // The new category is now part of the canonical set, so a near-miss
    // classifier label on the next add merges into it.
    let next = assign_category(
        "tidy the desk",
        &board.distinct_categories(),
        ClassifierOutcome::Label("Wrok".to_string()),
    );
    assert_eq!(next, "Work");
}
