//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables. Command-line flags are applied on top by
//! the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`DashboardConfig::latency_ms`].
pub const LATENCY_ENV: &str = "CRIME_INSIGHTS_LATENCY_MS";

/// Environment variable overriding [`DashboardConfig::dataset_path`].
pub const DATASET_ENV: &str = "CRIME_INSIGHTS_DATASET";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is malformed.
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override has an unusable value.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Simulated model latency in milliseconds.
    pub latency_ms: u64,
    /// Reference dataset to load instead of the embedded snapshot.
    pub dataset_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            latency_ms: 800,
            dataset_path: None,
        }
    }
}

impl DashboardConfig {
    /// Parses a config from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the config file at `path` (if any) and applies environment
    /// overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                        path: path.display().to_string(),
                        source,
                    })?;
                log::debug!("Loaded config from {}", path.display());
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up through `var`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the latency override is not
    /// a whole number of milliseconds.
    pub fn with_env_overrides<F>(mut self, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var(LATENCY_ENV) {
            self.latency_ms = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: LATENCY_ENV,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = var(DATASET_ENV)
            && !value.is_empty()
        {
            self.dataset_path = Some(PathBuf::from(value));
        }

        Ok(self)
    }

    /// Simulated model latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
