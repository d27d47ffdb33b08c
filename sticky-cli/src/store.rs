//! Whole-state persistence under ~/.sticky.
//!
//! The board is always read in full and written back in full; there is no
//! partial update path.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use sticky_core::Board;

pub fn sticky_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STICKY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".sticky"))
}

pub fn ensure_home() -> Result<PathBuf> {
    let dir = sticky_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn board_path(home: &Path) -> PathBuf {
    home.join("board.json")
}

/// Missing file -> empty board.
pub fn load_board(home: &Path) -> Result<Board> {
    let p = board_path(home);
    if !p.exists() {
        return Ok(Board::new());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?)
}

pub fn save_board(home: &Path, board: &Board) -> Result<()> {
    let p = board_path(home);
    let json = serde_json::to_string_pretty(board)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
