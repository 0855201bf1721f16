//! Configuration management for pplx-chat.
//!
//! Loads settings from `~/.config/pplx-chat/config.toml` with environment overrides.
//! The API key is never stored here: the CLI reads it from `PPLX_API_KEY` and
//! the GUI receives it per request.

use crate::error::PplxError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

/// Model the GUI substitutes when the browser leaves the field blank.
/// Note the CLI sends `sonar` (see `cli::CLI_MODEL`).
pub const DEFAULT_GUI_MODEL: &str = "sonar-small-online";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// 0 lets the OS pick a free port.
    #[serde(default)]
    pub port: u16,
    #[serde(default = "default_true")]
    pub open_browser: bool,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    #[serde(default)]
    pub log_verbosity: LogVerbosity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogVerbosity {
    Minimal,
    #[default]
    Compact,
    Verbose,
}

// Default value functions
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_model() -> String { DEFAULT_GUI_MODEL.to_string() }
fn default_timeout_secs() -> u64 { 60 }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_true() -> bool { true }
fn default_read_timeout_secs() -> u64 { 10 }
fn default_write_timeout_secs() -> u64 { 60 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 0,
            open_browser: default_true(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            log_verbosity: LogVerbosity::default(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pplx-chat")
            .join("config.toml")
    }

    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, PplxError> {
        Self::load_from(Self::default_path())
    }

    /// Load config with environment overrides applied (convenience method).
    /// An unreadable or malformed file is logged and replaced by defaults.
    pub fn load_with_env() -> Self {
        Self::load_or_default(Self::default_path()).with_env_overrides()
    }

    /// Load config from `path`, warning and falling back to defaults on error.
    pub fn load_or_default(path: PathBuf) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!("ignoring config file: {}", err);
            Self::default()
        })
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from(path: PathBuf) -> Result<Self, PplxError> {
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| PplxError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PplxError::Config(format!("{}: {}", path.display(), e))),
        }
    }

    /// Apply environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PPLX_API_URL") {
            if !url.trim().is_empty() {
                self.api.endpoint = url.trim().to_string();
            }
        }
        if let Ok(model) = std::env::var("PPLX_DEFAULT_MODEL") {
            if !model.trim().is_empty() {
                self.api.default_model = model.trim().to_string();
            }
        }
        if let Ok(val) = std::env::var("PPLX_GUI_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        self
    }
}
