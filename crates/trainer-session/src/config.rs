//! Configuration for the stack trainer.

use crate::settings::DEFAULT_TIMER_SECS;
use deck_engine::StackKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionTrackingConfig,
    #[serde(default)]
    pub timer: TimerConfig,
}

impl Config {
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stack-trainer")
            .map(|d| d.config_dir().join("config.toml"))
    }

    pub fn db_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stack-trainer")
            .map(|d| d.data_dir().join("trainer.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTrackingConfig {
    /// Start an open session as soon as a training view activates.
    #[serde(default = "default_true")]
    pub auto_start_open_session: bool,
    /// Stack selected on first launch.
    #[serde(default = "default_stack")]
    pub default_stack: StackKey,
}

fn default_true() -> bool {
    true
}

fn default_stack() -> StackKey {
    StackKey::Mnemonica
}

impl Default for SessionTrackingConfig {
    fn default() -> Self {
        Self {
            auto_start_open_session: true,
            default_stack: StackKey::Mnemonica,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_timer_secs")]
    pub duration_secs: u32,
}

fn default_timer_secs() -> u32 {
    DEFAULT_TIMER_SECS
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: DEFAULT_TIMER_SECS,
        }
    }
}
