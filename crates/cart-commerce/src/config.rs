//! Cart configuration.
//!
//! Loaded from a TOML or JSON file (chosen by extension), then overridden by
//! environment variables:
//!
//! - `CART_API_URL` - Storefront API base URL (default: `http://localhost:3333`)
//! - `CART_API_TIMEOUT_SECS` - Per-request timeout; unset means no timeout
//! - `CART_STORAGE_KEY` - Snapshot key (default: `@RocketShoes:cart`)
//! - `CART_STORAGE_PATH` - File backing the key-value store
//! - `CART_LOG_FORMAT` - `json` or `human` (default: `human`)
//! - `CART_LOG_FILTER` - Tracing filter directive (default: `info`)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key the cart snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Storefront API used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Snapshot storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Storefront API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the cart snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Namespaced key for the snapshot.
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// File backing the store; in-memory when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            path: None,
        }
    }
}

/// Storefront API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL; `products/{id}` and `stock/{id}` are resolved against it.
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: None,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "human" | "pretty" | "text" => Ok(LogFormat::Human),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Human => write!(f, "human"),
        }
    }
}

impl CartConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `CART_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CART_*` overrides using `lookup` to read variables.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CART_API_URL") {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup("CART_API_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("CART_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
            self.api.timeout_secs = Some(secs);
        }
        if let Some(key) = lookup("CART_STORAGE_KEY") {
            self.storage.key = key;
        }
        if let Some(path) = lookup("CART_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("CART_LOG_FORMAT") {
            self.logging.format = raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CART_LOG_FORMAT".to_string(), e))?;
        }
        if let Some(filter) = lookup("CART_LOG_FILTER") {
            self.logging.filter = filter;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CartConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://shop.example.com/api"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_load_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"storage": {{"key": "@shop:cart", "path": "cart.json"}}}}"#).unwrap();

        let config = CartConfig::load(file.path()).unwrap();
        assert_eq!(config.storage.key, "@shop:cart");
        assert_eq!(config.storage.path, Some(PathBuf::from("cart.json")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CartConfig::load("/nonexistent/cart.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CART_API_URL", "http://api.test"),
            ("CART_API_TIMEOUT_SECS", "5"),
            ("CART_STORAGE_KEY", "@test:cart"),
            ("CART_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let config = CartConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "http://api.test");
        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.storage.key, "@test:cart");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_override() {
        let err = CartConfig::default()
            .with_overrides(|key| (key == "CART_API_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "CART_API_TIMEOUT_SECS"));
    }
}
