//! Application configuration loaded from TOML and the environment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "TICTACTOE_DB";

/// Settings for the console game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file holding recorded games.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Clear the terminal before the welcome banner.
    #[serde(default = "default_true")]
    clear_screen: bool,

    /// Wait for Enter before the first move.
    #[serde(default = "default_true")]
    wait_for_start: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_db_path() -> String {
    "tictactoe.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            clear_screen: true,
            wait_for_start: true,
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file at `path` if given, else defaults, then applies the
    /// [`DB_PATH_ENV`] override.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        match std::env::var(DB_PATH_ENV) {
            Ok(db_path) if !db_path.is_empty() => {
                debug!(db_path = %db_path, "Database path overridden by environment");
                Ok(config.with_db_path(db_path))
            }
            _ => Ok(config),
        }
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Enables or disables both interactive screen niceties (clearing and
    /// waiting for Enter).
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.clear_screen = interactive;
        self.wait_for_start = interactive;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_path(), "tictactoe.db");
        assert!(*config.clear_screen());
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml_str(
            "db_path = \"games.sqlite\"\nclear_screen = false\nlog_filter = \"debug\"\n",
        )
        .expect("parse");
        assert_eq!(config.db_path(), "games.sqlite");
        assert!(!*config.clear_screen());
        assert!(*config.wait_for_start());
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = AppConfig::from_toml_str("clear_screen = \"maybe\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = AppConfig::from_file("/nonexistent/tictactoe.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
