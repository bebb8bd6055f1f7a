//! Probe configuration management
//!
//! Configuration is resolved once at startup from an optional TOML file
//! (`CONFIG_PATH`) overlaid with environment variables, then validated.
//! There are no defaults for the endpoint, token or model: a run without them
//! is a configuration error.

use crate::core::constants::{env, request};
use crate::core::logging::DEFAULT_LOG_LEVEL;
use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub probe: ProbeSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl TomlConfig {
    /// Load a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse TOML configuration")
    }
}

/// Immutable probe configuration
#[derive(Clone)]
pub struct Config {
    /// Endpoint the request is posted to, used as given
    pub base_url: String,

    /// Bearer token
    pub api_key: String,

    /// Model identifier sent in the request body
    pub model: String,

    /// Logging level
    pub log_level: String,

    /// Request timeout
    pub request_timeout: Duration,
}

// The token must never reach logs, so Debug is written by hand.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("log_level", &self.log_level)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Reads `CONFIG_PATH` if set, then lets `PROBE_*` and `LOG_LEVEL`
    /// variables override the file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or a required value is
    /// missing or invalid
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var(env::CONFIG_PATH) {
            Ok(path) => TomlConfig::from_file(path)?,
            Err(_) => TomlConfig::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with a variable lookup and validate the result
    ///
    /// Blank variables are treated as unset.
    pub fn resolve<F>(file: TomlConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, fallback: Option<String>| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or(fallback)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = pick(env::BASE_URL, file.probe.base_url)
            .with_context(|| format!("Endpoint URL not configured (set {})", env::BASE_URL))?;
        let api_key = pick(env::API_KEY, file.probe.api_key)
            .with_context(|| format!("Bearer token not configured (set {})", env::API_KEY))?;
        let model = pick(env::MODEL, file.probe.model)
            .with_context(|| format!("Model not configured (set {})", env::MODEL))?;
        let log_level = pick(env::LOG_LEVEL, file.logging.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        validate_url(&base_url)?;

        Ok(Config {
            base_url,
            api_key,
            model,
            log_level,
            request_timeout: request::TIMEOUT,
        })
    }
}

fn validate_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("Invalid endpoint URL: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("Unsupported URL scheme '{}' in {}", other, raw),
    }
}
