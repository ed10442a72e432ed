//! Server configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the Alpha Vantage key from the file.
pub const ALPHAVANTAGE_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ServerConfig`].
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Alpha Vantage API key; enables the fallback quote provider
    #[serde(default)]
    pub alphavantage_api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            alphavantage_api_key: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment overrides (currently only the Alpha Vantage key).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(ALPHAVANTAGE_KEY_ENV) {
            if !key.trim().is_empty() {
                self.alphavantage_api_key = Some(key);
            }
        }
        self
    }

    /// API keys in the shape the provider registry expects.
    pub fn api_keys(&self) -> HashMap<String, String> {
        let mut keys = HashMap::new();
        if let Some(key) = &self.alphavantage_api_key {
            keys.insert("alphavantage".to_string(), key.clone());
        }
        keys
    }
}
