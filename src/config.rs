//! Configuration module
//!
//! Reads TOML configuration from `~/.config/chargebook/config.toml`
//! (overridable via the `CHARGEBOOK_CONFIG` environment variable), falling
//! back to defaults for anything absent.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::notifications::SchedulerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub scheduler: SchedulerSection,
    pub server: ServerSection,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database URL; `DATABASE_URL` in the environment wins
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./chargebook.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    /// Minutes between reminder sweeps
    pub reminder_check_mins: u64,
    /// Hours before the slot start a reminder goes out
    pub reminder_lead_hours: i64,
    /// Hours between expired-notification cleanups
    pub cleanup_interval_hours: i64,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            reminder_check_mins: 30,
            reminder_lead_hours: 2,
            cleanup_interval_hours: 6,
        }
    }
}

impl SchedulerSection {
    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            reminder_check_interval: std::time::Duration::from_secs(self.reminder_check_mins * 60),
            reminder_lead: chrono::Duration::hours(self.reminder_lead_hours),
            cleanup_interval: chrono::Duration::hours(self.cleanup_interval_hours),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Seconds to wait for in-flight work during shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            shutdown_timeout: 30,
        }
    }
}

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chargebook")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.scheduler.reminder_check_mins, 30);
        assert_eq!(cfg.scheduler.cleanup_interval_hours, 6);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.server.shutdown_timeout, 30);
    }

    #[test]
    fn sections_can_be_partially_overridden() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [scheduler]
            reminder_check_mins = 5

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.scheduler.reminder_check_mins, 5);
        assert_eq!(cfg.scheduler.reminder_lead_hours, 2);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn scheduler_section_converts_to_config() {
        let section = SchedulerSection::default();
        let config = section.to_scheduler_config();
        assert_eq!(config.reminder_check_interval.as_secs(), 30 * 60);
        assert_eq!(config.reminder_lead, chrono::Duration::hours(2));
        assert_eq!(config.cleanup_interval, chrono::Duration::hours(6));
    }
}
