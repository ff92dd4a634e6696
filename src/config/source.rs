//! Key/value configuration sources
//!
//! Configuration is read from environment-style input: the process
//! environment (plus a `.env` file when present), an optional TOML settings
//! file, or an explicit map supplied by an embedder or a test.

use crate::config::parser::{load_config_from, load_settings_file, RECOGNIZED_KEYS};
use crate::config::types::Config;
use crate::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;

/// A snapshot of environment-style key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    values: HashMap<String, String>,
}

impl ConfigSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the recognized keys from the process environment
    ///
    /// A `.env` file in the working directory is loaded first if one exists.
    /// Variables already set in the environment are never overridden by it.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let values = std::env::vars()
            .filter(|(key, _)| RECOGNIZED_KEYS.contains(&key.as_str()))
            .collect();

        Self { values }
    }

    /// Builds a source from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Merges two sources; values in `overlay` win
    pub fn layered(base: ConfigSource, overlay: ConfigSource) -> Self {
        let mut values = base.values;
        values.extend(overlay.values);
        Self { values }
    }

    /// Sets a single value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the trimmed value for `key`, treating blank values as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Anything that can produce a fresh, validated [`Config`]
///
/// Top-level operations call [`ConfigProvider::load`] once per invocation so
/// that no configuration state is shared between calls.
pub trait ConfigProvider {
    fn load(&self) -> Result<Config, ConfigError>;
}

impl ConfigProvider for Config {
    fn load(&self) -> Result<Config, ConfigError> {
        Ok(self.clone())
    }
}

impl ConfigProvider for ConfigSource {
    fn load(&self) -> Result<Config, ConfigError> {
        load_config_from(self)
    }
}

/// Reads the process environment, optionally layered over a settings file
#[derive(Debug, Clone, Default)]
pub struct EnvProvider {
    settings_path: Option<PathBuf>,
}

impl EnvProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a TOML settings file as the base layer under the environment
    pub fn with_settings_file(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: Some(path.into()),
        }
    }
}

impl ConfigProvider for EnvProvider {
    fn load(&self) -> Result<Config, ConfigError> {
        let env = ConfigSource::from_env();

        let source = match &self.settings_path {
            Some(path) => ConfigSource::layered(load_settings_file(path)?, env),
            None => env,
        };

        load_config_from(&source)
    }
}
