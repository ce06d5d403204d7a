// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chime.toml configuration
//!
//! ```toml
//! [clock]
//! interval_ms = 1000
//! resolution_ms = 1000
//! ticks = 10
//!
//! [log]
//! level = "info"
//! file = "clock.log"
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "chime.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub clock: ClockConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Time between clock reads
    pub interval_ms: u64,
    /// Size of the time bucket whose change fires a tick
    pub resolution_ms: u64,
    /// Stop after this many ticks; run until interrupted when unset
    pub ticks: Option<usize>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            resolution_ms: 1000,
            ticks: None,
        }
    }
}

impl ClockConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn resolution(&self) -> Duration {
        Duration::from_millis(self.resolution_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Tracing filter used when CHIME_LOG is not set
    pub level: String,
    /// File the log observer appends tick lines to
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `chime.toml` in the working
    /// directory if it exists, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "clock.interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.clock.resolution_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "clock.resolution_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.clock.ticks == Some(0) {
            return Err(ConfigError::Invalid {
                field: "clock.ticks",
                reason: "must be greater than zero when set".to_string(),
            });
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log.level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
