//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/togglq/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/togglq/` (~/.config/togglq/)
//! - State/Logs: `$XDG_STATE_HOME/togglq/` (~/.local/state/togglq/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Request queue pacing
    #[serde(default)]
    pub queue: QueueConfig,

    /// Detailed report retrieval limits
    #[serde(default)]
    pub report: ReportConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Request queue configuration
///
/// The remote report API throttles rapid-fire requests, so queued fetches
/// are spaced out by at least `spacing_ms`.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueConfig {
    /// Minimum milliseconds between the end of one request and the start of the next
    #[serde(default = "default_queue_spacing")]
    pub spacing_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            spacing_ms: default_queue_spacing(),
        }
    }
}

impl QueueConfig {
    /// Spacing as a [`Duration`]
    pub fn spacing(&self) -> Duration {
        Duration::from_millis(self.spacing_ms)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.spacing_ms > 60_000 {
            return Err(Error::Config(
                "queue.spacing_ms must not exceed 60000".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_queue_spacing() -> u64 {
    250
}

/// Detailed report retrieval configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Maximum pages fetched for a single missing date range
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
        }
    }
}

impl ReportConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(Error::Config(
                "report.page_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_page_limit() -> u32 {
    50
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.queue.validate()?;
        config.report.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/togglq/config.toml` (~/.config/togglq/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("togglq").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/togglq/` (~/.local/state/togglq/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("togglq")
    }
}
