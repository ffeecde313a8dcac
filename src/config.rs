//! Stopwatch configuration
//!
//! Settings come from environment variables, or from a TOML file when the
//! `toml-config` feature is enabled.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_AUTO_START: &str = "SPLITWATCH_AUTO_START";
pub const ENV_TRACE_SPLITS: &str = "SPLITWATCH_TRACE_SPLITS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    /// Start running as soon as the stopwatch is created
    pub auto_start: bool,

    /// Emit a `debug` event for every recorded split
    pub trace_splits: bool,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            trace_splits: true,
        }
    }
}

impl StopwatchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Values that do not parse as `bool` keep their default.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_AUTO_START) {
            config.auto_start = val.trim().parse().unwrap_or(config.auto_start);
        }

        if let Some(val) = lookup(ENV_TRACE_SPLITS) {
            config.trace_splits = val.trim().parse().unwrap_or(config.trace_splits);
        }

        config
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: StopwatchConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> anyhow::Result<Self> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }

    /// Save configuration to TOML file
    #[cfg(feature = "toml-config")]
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn save_to_file(&self, _path: &Path) -> anyhow::Result<()> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(self) -> Self {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    pub fn merge_with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Self::from_vars(&lookup);

        if lookup(ENV_AUTO_START).is_some() {
            self.auto_start = overrides.auto_start;
        }

        if lookup(ENV_TRACE_SPLITS).is_some() {
            self.trace_splits = overrides.trace_splits;
        }

        self
    }
}
