use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use sticky_core::DEFAULT_SNOOZE_MINUTES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone for due-date parsing and history day keys.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub llm: LlmSection,

    #[serde(default)]
    pub reminders: RemindersSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmSection {
    /// "anthropic" or "openai". Unset -> classifier unavailable, keyword
    /// rules only.
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersSection {
    pub snooze_minutes_default: i64,
}

impl Default for RemindersSection {
    fn default() -> Self {
        Self {
            snooze_minutes_default: DEFAULT_SNOOZE_MINUTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            llm: LlmSection::default(),
            reminders: RemindersSection::default(),
        }
    }
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn check_config(home: &Path) -> Result<()> {
    let cfg = load_config(home)?;

    println!("Config ({}):\n", config_path(home).display());
    println!("- timezone: {}", cfg.timezone);
    println!(
        "- llm.provider: {}",
        cfg.llm.provider.as_deref().unwrap_or("<not set, keyword rules only>")
    );
    println!("- llm.model: {}", cfg.llm.model.as_deref().unwrap_or("<default>"));
    println!(
        "- llm.api_key: {}",
        if cfg.llm.api_key.is_some() { "set" } else { "<not set>" }
    );
    println!("- reminders.snooze_minutes_default: {}", cfg.reminders.snooze_minutes_default);

    if cfg.llm.provider.is_none() {
        println!("\nTo enable AI categories, set ~/.sticky/config.toml:");
        println!("[llm]");
        println!("provider = \"anthropic\"");
        println!("model = \"claude-3-5-haiku-latest\"");
        println!("api_key = \"sk-ant-...\"");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_classifier() {
        let cfg = Config::default();
        assert_eq!(cfg.timezone, "America/Chicago");
        assert!(cfg.llm.provider.is_none());
        assert_eq!(cfg.reminders.snooze_minutes_default, 5);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("timezone = \"Europe/Berlin\"").unwrap();
        assert_eq!(cfg.timezone, "Europe/Berlin");
        assert!(cfg.llm.provider.is_none());
        assert_eq!(cfg.reminders.snooze_minutes_default, 5);
    }
}
