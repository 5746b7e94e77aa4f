//! Configuration loading and resolution
//!
//! Every setting is resolved once at start-up following this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::{Error, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://feedback.db?mode=rwc";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.0-pro";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;

pub const ENV_BIND: &str = "FEEDBACK_BIND";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";

/// Optional TOML configuration file contents
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_api_base: Option<String>,
    pub gemini_timeout_secs: Option<u64>,
}

/// Read and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub gemini_model: Option<String>,
}

/// Settings for the Gemini text-generation endpoint
#[derive(Clone, PartialEq)]
pub struct GeminiSettings {
    /// `None` means analysis is disabled and every submission gets the fallback
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind: String,
    pub database_url: String,
    pub gemini: GeminiSettings,
}

impl ServiceConfig {
    /// Resolve against the process environment
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        Self::resolve_with(cli, toml_config, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with<F>(cli: &CliOverrides, toml_config: &TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |cli_value: &Option<String>, env_name: &str, toml_value: &Option<String>| {
            cli_value
                .clone()
                .filter(|v| is_valid_key(v))
                .or_else(|| env(env_name).filter(|v| is_valid_key(v)))
                .or_else(|| toml_value.clone().filter(|v| is_valid_key(v)))
        };

        let bind = pick(&cli.bind, ENV_BIND, &toml_config.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let database_url = pick(&cli.database_url, ENV_DATABASE_URL, &toml_config.database_url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let model = pick(&cli.gemini_model, ENV_GEMINI_MODEL, &toml_config.gemini_model)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let api_base = pick(&None, ENV_GEMINI_API_BASE, &toml_config.gemini_api_base)
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());

        let timeout_secs = match env(ENV_GEMINI_TIMEOUT_SECS).filter(|v| is_valid_key(v)) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{ENV_GEMINI_TIMEOUT_SECS} must be a whole number of seconds: {e}"))
            })?,
            None => toml_config
                .gemini_timeout_secs
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(Error::Config("Gemini timeout must be greater than 0".to_string()));
        }

        let api_key = resolve_api_key(env(ENV_GEMINI_API_KEY), toml_config.gemini_api_key.as_ref());

        Ok(Self {
            bind,
            database_url,
            gemini: GeminiSettings {
                api_key,
                model,
                api_base: api_base.trim_end_matches('/').to_string(),
                timeout_secs,
            },
        })
    }
}

/// Resolve the Gemini API key from ENV then TOML
fn resolve_api_key(env_key: Option<String>, toml_key: Option<&String>) -> Option<String> {
    let env_valid = env_key.as_deref().map(is_valid_key).unwrap_or(false);
    let toml_valid = toml_key.map(|k| is_valid_key(k)).unwrap_or(false);

    if env_valid && toml_valid {
        warn!("Gemini API key found in environment and TOML. Using environment (higher priority).");
    }

    if env_valid {
        info!("Gemini API key loaded from environment variable");
        return env_key.map(|k| k.trim().to_string());
    }
    if toml_valid {
        info!("Gemini API key loaded from TOML config");
        return toml_key.map(|k| k.trim().to_string());
    }
    None
}

/// Validate a configuration value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
