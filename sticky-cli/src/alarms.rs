//! Local alarm queue: schedule, list, dispatch, snooze.
//!
//! The queue is a key -> alarm map persisted as JSON; re-scheduling a key
//! replaces the previous alarm (last write wins), which is also how snooze
//! works. Dispatch fires due alarms as desktop notifications when a notifier
//! is present and plain terminal output otherwise.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use sticky_core::{Alarm, Board, alarm_for, day_key, resolve_tz, snooze};

use crate::config::load_config;
use crate::store::load_board;

#[derive(Subcommand, Debug)]
pub enum RemindCommand {
    /// Schedule alarms for every active task with a due time
    Sync,

    /// List scheduled alarms, soonest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Fire due alarms and drop them from the queue
    Dispatch {
        /// Print what would fire without firing or dropping anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Queue summary (scheduled/due)
    Status,

    /// Reschedule a task's alarm N minutes from now (same key, replaces)
    Snooze {
        /// Task id or unique id prefix
        task_id: String,

        #[arg(long)]
        minutes: Option<i64>,
    },
}

pub fn run(cmd: RemindCommand, home: &Path) -> Result<()> {
    match cmd {
        RemindCommand::Sync => sync(home),
        RemindCommand::List { limit } => list(home, limit),
        RemindCommand::Dispatch { dry_run } => dispatch(home, dry_run),
        RemindCommand::Status => status(home),
        RemindCommand::Snooze { task_id, minutes } => snooze_cmd(home, &task_id, minutes),
    }
}

fn alarms_path(home: &Path) -> PathBuf {
    home.join("alarms.json")
}

pub fn load_alarms(home: &Path) -> Result<BTreeMap<String, Alarm>> {
    let p = alarms_path(home);
    if !p.exists() {
        return Ok(BTreeMap::new());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?)
}

pub fn save_alarms(home: &Path, alarms: &BTreeMap<String, Alarm>) -> Result<()> {
    let p = alarms_path(home);
    let json = serde_json::to_string_pretty(alarms)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Insert-or-replace one alarm under its key.
pub fn schedule(home: &Path, alarm: Alarm) -> Result<()> {
    let mut alarms = load_alarms(home)?;
    alarms.insert(alarm.key.clone(), alarm);
    save_alarms(home, &alarms)
}

fn sync(home: &Path) -> Result<()> {
    let board = load_board(home)?;
    let mut alarms = load_alarms(home)?;

    // Drop alarms whose task left the board.
    let before = alarms.len();
    alarms.retain(|_, a| board.get(&a.task_id).is_some());
    let pruned = before - alarms.len();

    let mut scheduled = 0usize;
    for task in &board.active {
        if let Some(a) = alarm_for(task) {
            alarms.insert(a.key.clone(), a);
            scheduled += 1;
        }
    }
    save_alarms(home, &alarms)?;

    println!("Scheduled {scheduled} alarms ({pruned} stale dropped).");
    Ok(())
}

fn list(home: &Path, limit: usize) -> Result<()> {
    let alarms = load_alarms(home)?;
    if alarms.is_empty() {
        println!("No alarms scheduled.");
        return Ok(());
    }
    let board = load_board(home)?;

    let mut rows: Vec<&Alarm> = alarms.values().collect();
    rows.sort_by_key(|a| a.fire_at);

    for (i, a) in rows.iter().take(limit).enumerate() {
        let text = board
            .get(&a.task_id)
            .map(|t| t.text.as_str())
            .unwrap_or("<task gone>");
        println!("{}. {} at {} — {}", i + 1, a.key, a.fire_at.to_rfc3339(), text);
    }
    Ok(())
}

fn dispatch(home: &Path, dry_run: bool) -> Result<()> {
    let cfg = load_config(home)?;
    let tz = resolve_tz(&cfg.timezone)?;
    let board = load_board(home)?;
    let mut alarms = load_alarms(home)?;

    let now = Utc::now();
    let due: Vec<Alarm> = alarms
        .values()
        .filter(|a| a.fire_at <= now)
        .cloned()
        .collect();

    if due.is_empty() {
        println!("No due alarms.");
        return Ok(());
    }

    let today = day_key(now.with_timezone(&tz));
    let mut fired = 0usize;

    for alarm in due {
        let text = reminder_text(&board, &alarm.task_id, &today);

        if dry_run {
            println!("[DRY RUN] would fire {} — {}", alarm.key, text);
            continue;
        }

        deliver(&text);
        alarms.remove(&alarm.key);
        fired += 1;
    }

    if !dry_run {
        save_alarms(home, &alarms)?;
        println!("Fired {fired} reminders.");
    }
    Ok(())
}

/// Task text for a firing alarm. The task may have been finalized or deleted
/// since the alarm was scheduled; try today's history, then give up politely.
fn reminder_text(board: &Board, task_id: &str, today: &str) -> String {
    if let Some(t) = board.get(task_id) {
        return t.text.clone();
    }
    if let Some(entries) = board.history.get(today) {
        if let Some(e) = entries.iter().find(|e| e.task_id == task_id) {
            return e.text.clone();
        }
    }
    "It's time!".to_string()
}

fn deliver(text: &str) {
    println!("Task reminder: {text}");
    match std::process::Command::new("notify-send")
        .args(["Task reminder", text])
        .status()
    {
        Ok(s) if s.success() => {}
        Ok(s) => warn!("notify-send exited with {s}"),
        Err(err) => warn!("notify-send unavailable: {err}"),
    }
}

fn status(home: &Path) -> Result<()> {
    let alarms = load_alarms(home)?;
    let now = Utc::now();
    let due = alarms.values().filter(|a| a.fire_at <= now).count();
    println!("Alarms: {} scheduled, {} due", alarms.len(), due);
    Ok(())
}

fn snooze_cmd(home: &Path, task_id: &str, minutes: Option<i64>) -> Result<()> {
    let board = load_board(home)?;
    let Some(id) = board.resolve_id(task_id) else {
        println!("No matching task.");
        return Ok(());
    };

    let cfg = load_config(home)?;
    let minutes = minutes.unwrap_or(cfg.reminders.snooze_minutes_default);
    let alarm = snooze(&id, minutes, Utc::now());
    let fire_at = alarm.fire_at;
    schedule(home, alarm)?;

    println!("Snoozed {id} until {}.", fire_at.to_rfc3339());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sticky_core::alarm_key;

    fn temp_home(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sticky-alarms-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn schedule_replaces_same_key() {
        let home = temp_home("replace");
        let now = Utc::now();

        schedule(
            &home,
            Alarm {
                key: alarm_key("t1"),
                task_id: "t1".to_string(),
                fire_at: now + Duration::minutes(30),
            },
        )
        .unwrap();
        schedule(&home, snooze("t1", 5, now)).unwrap();

        let alarms = load_alarms(&home).unwrap();
        assert_eq!(alarms.len(), 1);
        assert_eq!(alarms[&alarm_key("t1")].fire_at, now + Duration::minutes(5));

        fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn missing_queue_is_empty() {
        let home = temp_home("empty");
        assert!(load_alarms(&home).unwrap().is_empty());
        fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn reminder_text_falls_back_to_history_then_default() {
        let mut board = Board::new();
        board.add(sticky_core::Task::new("live", "water plants", "Chores", Utc::now()));

        assert_eq!(reminder_text(&board, "live", "2026-02-19"), "water plants");
        assert_eq!(reminder_text(&board, "gone", "2026-02-19"), "It's time!");
    }
}
