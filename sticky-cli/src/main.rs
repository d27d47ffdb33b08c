//! sticky: a sticky-note to-do list that files tasks under auto-assigned
//! categories, parses due times out of the task text, and nags you locally.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

use sticky_core::{
    ClassifierOutcome, Task, TaskStatus, alarm_for, assign_category, parse_due, resolve_tz,
};

mod alarms;
mod classifier;
mod config;
mod store;

#[derive(Parser, Debug)]
#[command(name = "sticky", version, about = "Sticky-note to-do list with auto categories and reminders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task; category and due time come from the text itself
    Add {
        /// Task text, e.g. "reply to boss email tomorrow 9am"
        text: Vec<String>,
    },

    /// Show active tasks grouped by category
    List,

    /// Mark a task done (moves it to history)
    Done {
        /// Task id or unique id prefix
        id: String,
    },

    /// Skip a task (moves it to history)
    Skip {
        /// Task id or unique id prefix
        id: String,
    },

    /// Delete a task outright (no history entry)
    Delete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Rename a category across active tasks and history
    Rename { old: String, new: String },

    /// Show finalized tasks grouped by day, newest first
    History,

    /// Drop all history
    ClearHistory,

    /// Reminder queue commands
    Remind {
        #[command(subcommand)]
        command: alarms::RemindCommand,
    },

    /// Config commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml
    Init,
    /// Show the effective config
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let home = store::ensure_home()?;

    match cli.command {
        Command::Add { text } => add(&home, text.join(" ")).await?,
        Command::List => list(&home)?,
        Command::Done { id } => finalize(&home, &id, TaskStatus::Done)?,
        Command::Skip { id } => finalize(&home, &id, TaskStatus::Skipped)?,
        Command::Delete { id } => delete(&home, &id)?,
        Command::Rename { old, new } => rename(&home, &old, &new)?,
        Command::History => history(&home)?,
        Command::ClearHistory => clear_history(&home)?,
        Command::Remind { command } => alarms::run(command, &home)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
            ConfigCommand::Check => config::check_config(&home)?,
        },
    }

    Ok(())
}

/// Tracing is opt-in via RUST_LOG; default is silent.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn local_now(home: &Path) -> Result<(DateTime<Tz>, Tz)> {
    let cfg = config::load_config(home)?;
    let tz = resolve_tz(&cfg.timezone)?;
    Ok((Utc::now().with_timezone(&tz), tz))
}

async fn add(home: &Path, text: String) -> Result<()> {
    let text = text.trim().to_string();
    if text.is_empty() {
        println!("Nothing to add.");
        return Ok(());
    }

    let cfg = config::load_config(home)?;
    let tz = resolve_tz(&cfg.timezone)?;
    let mut board = store::load_board(home)?;
    let existing = board.distinct_categories();

    let outcome = match classifier::Classifier::from_config(&cfg) {
        Some(c) => c.classify(&text, &existing).await,
        None => ClassifierOutcome::Unavailable,
    };
    let category = assign_category(&text, &existing, outcome);

    let now = Utc::now();
    let due = parse_due(&text, now.with_timezone(&tz));

    let mut task = Task::new(Uuid::new_v4().to_string(), text, category.clone(), now);
    if let Some(d) = due {
        task = task.with_due(d.with_timezone(&Utc));
    }

    if let Some(alarm) = alarm_for(&task) {
        alarms::schedule(home, alarm)?;
    }

    let handle = short_id(&task.id).to_string();
    let chip = task
        .due_at
        .map(|d| format!("  (due {})", chip_text(d, now.with_timezone(&tz), tz)))
        .unwrap_or_default();

    board.add(task);
    store::save_board(home, &board)?;

    println!("[{handle}] {category}{chip}");
    Ok(())
}

fn list(home: &Path) -> Result<()> {
    let board = store::load_board(home)?;
    if board.active.is_empty() {
        println!("Nothing on the board.");
        return Ok(());
    }
    let (now, tz) = local_now(home)?;

    // Tomorrow strip first, same as the board header.
    let strip = board.due_tomorrow(now);
    if !strip.is_empty() {
        println!("Tomorrow:");
        for t in &strip {
            let time = t
                .due_at
                .map(|d| d.with_timezone(&tz).format("%H:%M").to_string())
                .unwrap_or_default();
            println!("  • {} — {}", t.text, time);
        }
        println!();
    }

    let mut by_cat: BTreeMap<&str, Vec<&Task>> = BTreeMap::new();
    for t in &board.active {
        by_cat.entry(t.category.as_str()).or_default().push(t);
    }

    for (cat, tasks) in &by_cat {
        println!("{} ({})", cat, tasks.len());
        for t in tasks {
            let chip = t
                .due_at
                .map(|d| format!("  ({})", chip_text(d, now, tz)))
                .unwrap_or_default();
            println!("  [{}] {}{}", short_id(&t.id), t.text, chip);
        }
        println!();
    }
    Ok(())
}

fn finalize(home: &Path, id: &str, status: TaskStatus) -> Result<()> {
    let mut board = store::load_board(home)?;
    let Some(id) = board.resolve_id(id) else {
        println!("No matching task.");
        return Ok(());
    };
    let (now, _) = local_now(home)?;

    match board.finalize(&id, status, now) {
        Some(entry) => {
            store::save_board(home, &board)?;
            println!("{:?}: {}", entry.status, entry.text);
        }
        None => println!("No matching task."),
    }
    Ok(())
}

fn delete(home: &Path, id: &str) -> Result<()> {
    let mut board = store::load_board(home)?;
    let Some(id) = board.resolve_id(id) else {
        println!("No matching task.");
        return Ok(());
    };
    if board.delete(&id) {
        store::save_board(home, &board)?;
        println!("Deleted.");
    } else {
        println!("No matching task.");
    }
    Ok(())
}

fn rename(home: &Path, old: &str, new: &str) -> Result<()> {
    let mut board = store::load_board(home)?;
    match board.rename_category(old, new) {
        Some(new_cat) => {
            store::save_board(home, &board)?;
            println!("Renamed {old:?} -> {new_cat:?}.");
        }
        None => println!("No change."),
    }
    Ok(())
}

fn history(home: &Path) -> Result<()> {
    let board = store::load_board(home)?;
    if board.history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }
    let (_, tz) = local_now(home)?;

    for (date, entries) in board.history.iter().rev() {
        println!("{date} ({})", entries.len());
        for e in entries {
            let time = e.finished_at.with_timezone(&tz).format("%H:%M");
            println!("  {} — {} • {:?} • {}", e.text, e.category, e.status, time);
        }
        println!();
    }
    Ok(())
}

fn clear_history(home: &Path) -> Result<()> {
    let mut board = store::load_board(home)?;
    board.clear_history();
    store::save_board(home, &board)?;
    println!("History cleared.");
    Ok(())
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

/// "Today 17:00" / "Tomorrow 09:00" / "2026-03-02 09:00", in local time.
fn chip_text(due: DateTime<Utc>, now_local: DateTime<Tz>, tz: Tz) -> String {
    let due_local = due.with_timezone(&tz);
    let time = due_local.format("%H:%M");

    let today = now_local.date_naive();
    let due_day = due_local.date_naive();
    if due_day == today {
        format!("Today {time}")
    } else if Some(due_day) == today.succ_opt() {
        format!("Tomorrow {time}")
    } else {
        format!("{} {time}", due_local.format("%Y-%m-%d"))
    }
}
