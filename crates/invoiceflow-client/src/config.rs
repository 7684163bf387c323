//! # Client Configuration
//!
//! Where the backend lives and how the client behaves.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     INVOICEFLOW_BASE_URL=https://api.example.com                        │
//! │     INVOICEFLOW_REQUEST_TIMEOUT_SECS=60                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     --config <path>, or ./invoiceflow.toml if present                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:3500, 30s, ₹                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # invoiceflow.toml
//! base_url = "https://invoices.example.com"
//! request_timeout_secs = 30
//! currency_symbol = "₹"
//! session_file = "/home/me/.invoiceflow-session.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use invoiceflow_core::money::{CurrencyFormat, DEFAULT_CURRENCY_DECIMALS, DEFAULT_CURRENCY_SYMBOL};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3500";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "INVOICEFLOW";

/// Config file looked up in the working directory when no path is given.
const DEFAULT_CONFIG_FILE: &str = "invoiceflow";

const SESSION_FILE_NAME: &str = "session.json";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL; endpoints are joined onto it.
    pub base_url: String,

    /// Timeout applied to every request, in seconds.
    pub request_timeout_secs: u64,

    /// Symbol used when displaying amounts.
    pub currency_symbol: String,

    /// Where the CLI keeps the session. Defaults to the platform config dir.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Defaults with a different base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Loads defaults, then the config file, then `INVOICEFLOW_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(file, ENV_PREFIX)
    }

    /// [`load`](Self::load) with a caller-chosen environment prefix.
    ///
    /// An explicit `file` must exist; the default `invoiceflow.toml` is optional.
    pub fn from_sources(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("currency_symbol", DEFAULT_CURRENCY_SYMBOL)?;

        builder = match file {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config: ClientConfig = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The base URL, parsed. Only `http` and `https` are accepted.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url",
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidValue {
                key: "base_url",
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone(), DEFAULT_CURRENCY_DECIMALS)
    }

    /// Session file location: the configured path, else
    /// `<config dir>/invoiceflow/session.json`.
    ///
    /// ## Platform-Specific Paths
    /// - **Linux**: `~/.config/invoiceflow/session.json`
    /// - **macOS**: `~/Library/Application Support/com.invoiceflow.invoiceflow/session.json`
    /// - **Windows**: `%APPDATA%\invoiceflow\invoiceflow\config\session.json`
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("com", "invoiceflow", "invoiceflow")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(SESSION_FILE_NAME))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            session_file: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
