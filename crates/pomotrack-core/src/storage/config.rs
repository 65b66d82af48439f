//! TOML-based application configuration.
//!
//! Stores the duration table (in minutes) and the fast-testing switch.
//! Configuration is stored at `~/.config/pomotrack/config.toml` and is read
//! once at construction; there is no runtime reconfiguration mid-session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::Durations;

/// Divisor applied to the duration table in dev mode: each configured
/// minute runs for 200ms, the same compression for all three kinds.
const DEV_COMPRESSION: u64 = 300;

/// Duration table configuration, in whole minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_pomodoro")]
    pub pomodoro: u64,
    #[serde(default = "default_short_break")]
    pub short_break: u64,
    #[serde(default = "default_long_break")]
    pub long_break: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomotrack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    /// Compress the whole duration table for fast manual testing.
    #[serde(default)]
    pub dev_mode: bool,
}

fn default_pomodoro() -> u64 {
    25
}
fn default_short_break() -> u64 {
    5
}
fn default_long_break() -> u64 {
    15
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            pomodoro: default_pomodoro(),
            short_break: default_short_break(),
            long_break: default_long_break(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: DurationsConfig::default(),
            dev_mode: false,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/pomotrack"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Write the configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The effective duration table in milliseconds, with dev-mode
    /// compression applied.
    pub fn durations(&self) -> Durations {
        let table = Durations::from_minutes(
            self.durations.pomodoro,
            self.durations.short_break,
            self.durations.long_break,
        );
        if self.dev_mode {
            table.compressed(DEV_COMPRESSION)
        } else {
            table
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::IntervalKind;

    #[test]
    fn default_config_yields_classic_table() {
        let durations = Config::default().durations();
        assert_eq!(durations.duration_for(IntervalKind::Pomodoro), 25 * 60 * 1000);
    }

    #[test]
    fn dev_mode_compresses_uniformly() {
        let cfg = Config {
            dev_mode: true,
            ..Config::default()
        };
        let durations = cfg.durations();
        assert_eq!(durations.duration_for(IntervalKind::Pomodoro), 5_000);
        assert_eq!(durations.duration_for(IntervalKind::ShortBreak), 1_000);
        assert_eq!(durations.duration_for(IntervalKind::LongBreak), 3_000);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("dev_mode = true").unwrap();
        assert!(cfg.dev_mode);
        assert_eq!(cfg.durations.pomodoro, 25);

        let cfg: Config = toml::from_str("[durations]\npomodoro = 45").unwrap();
        assert_eq!(cfg.durations.pomodoro, 45);
        assert_eq!(cfg.durations.short_break, 5);
        assert!(!cfg.dev_mode);
    }
}
