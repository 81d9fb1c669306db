//! Configuration handling for pocket-todo
//!
//! Configuration is stored in `<data-dir>/config.toml`. Every key is
//! optional; missing keys take their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Priority;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# pocket-todo configuration

# Priority preselected for new tasks (low, medium, high)
default_priority = "low"

# Ask for confirmation before deleting a task
confirm_delete = true

# strftime-style format used to display due dates
date_format = "%d/%m/%Y"

# How often the terminal UI polls for input, in milliseconds
tick_rate_ms = 250
"#;

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Priority preselected for new tasks
    pub default_priority: Priority,

    /// Ask before deleting a task
    pub confirm_delete: bool,

    /// Display format for due dates
    pub date_format: String,

    /// Input poll interval of the terminal UI
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_priority: Priority::Low,
            confirm_delete: true,
            date_format: "%d/%m/%Y".to_string(),
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config.toml` from a data directory, defaults if absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))
    }

    /// Writes the commented default config if none exists yet
    pub fn write_default(data_dir: &Path) -> Result<bool> {
        let config_path = data_dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Ok(false);
        }

        fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        Ok(true)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("date_format must not be empty".to_string()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.default_priority, Priority::Low);
        assert!(config.confirm_delete);
        assert_eq!(config.date_format, "%d/%m/%Y");
    }

    #[test]
    fn default_file_matches_default_struct() {
        assert_eq!(Config::parse(DEFAULT_CONFIG).unwrap(), Config::default());
    }

    #[test]
    fn parse_partial_config() {
        let config = Config::parse("default_priority = \"high\"\n").unwrap();
        assert_eq!(config.default_priority, Priority::High);
        assert!(config.confirm_delete);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn parse_rejects_bad_values() {
        assert!(matches!(
            Config::parse("default_priority = \"urgent\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::parse("tick_rate_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("date_format = \"%Q\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("date_format = \"%Y-%m-%d %\"\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn parse_accepts_custom_date_format() {
        let config = Config::parse("date_format = \"%Y-%m-%d %H:%M\"\n").unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn write_default_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(Config::write_default(dir.path()).unwrap());
        assert!(!Config::write_default(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}
