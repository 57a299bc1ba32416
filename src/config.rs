//! Configuration for console-control.
//!
//! Loaded from `~/.console-control/config.toml`. Every key is optional;
//! a missing or malformed file yields the defaults.
//!
//! ```toml
//! # Widget style: table, color
//! style = "color"
//!
//! [log]
//! level = "debug"
//! file = "/tmp/console-control.log"
//!
//! [menu_colors]
//! main_background = "black"
//! title_background = "light-cyan"
//! selection_background = "yellow"
//!
//! [message_colors]
//! message_background = "light-white"
//! ```
//!
//! Colors: `black`, `blue`, `green`, `cyan`, `red`, `magenta`, `yellow`,
//! `white` and their `light-` variants.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ui::{MenuColors, MessageColors, Style, StyleKind};

const CONFIG_DIR: &str = ".console-control";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "console-control.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config path")]
    NoHome,

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config: {0}")]
    Write(#[from] io::Error),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style used by the showcase widgets
    pub style: StyleKind,
    pub log: LogConfig,
    pub menu_colors: MenuColors,
    pub message_colors: MessageColors,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `console_control=debug`
    pub level: String,
    /// Log file; defaults to `~/.console-control/console-control.log`
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoHome)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Where logs are written: the configured file, else next to the config.
    pub fn log_path(&self) -> PathBuf {
        if let Some(file) = &self.log.file {
            return file.clone();
        }
        home_dir()
            .map(|home| home.join(CONFIG_DIR).join(LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE))
    }

    /// The configured style with its color sets.
    pub fn to_style(&self) -> Style {
        match self.style {
            StyleKind::Table => Style::Table,
            StyleKind::Color => Style::Color {
                menu: self.menu_colors,
                message: self.message_colors,
            },
        }
    }
}

/// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.to_style(), Style::Table);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "style = \"color\"\n\n[menu_colors]\nselection_background = \"light-yellow\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.style, StyleKind::Color);
        assert_eq!(config.menu_colors.selection_background, Color::LightYellow);
        assert_eq!(config.menu_colors.title_background, MenuColors::default().title_background);
        assert_eq!(config.log, LogConfig::default());
        match config.to_style() {
            Style::Color { menu, message } => {
                assert_eq!(menu, config.menu_colors);
                assert_eq!(message, MessageColors::default());
            }
            Style::Table => panic!("expected color style"),
        }
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "style = \"neon\"\n").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());

        fs::write(&path, "[menu_colors\n").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.style = StyleKind::Color;
        config.log.level = "debug".to_string();
        config.log.file = Some(dir.path().join("out.log"));
        config.message_colors.message_background = Color::LightWhite;

        config.save_to(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("message_background = \"light-white\""));
        assert_eq!(Config::load_from(&path), config);
        assert_eq!(config.log_path(), dir.path().join("out.log"));
    }
}
