//! Configuration management for the cattery CLI

use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{CatteryError, Result};

const DEFAULT_ENDPOINT: &str = "https://api.thecatapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// API key sent as the `x-api-key` header on every request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Page size for image list requests
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            api_key: None,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from the default location, layered with
    /// `CATTERY_*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path())
    }

    /// Load configuration from a specific file, layered with environment
    /// variables. A missing file is fine; defaults fill the gaps.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout", DEFAULT_TIMEOUT_SECS)?
            .set_default("list_limit", DEFAULT_LIST_LIMIT)?;

        if config_path.exists() {
            builder = builder.add_source(File::from(config_path));
        }
        builder = builder.add_source(Environment::with_prefix("CATTERY").try_parsing(true));

        let config = builder.build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Persist the configuration as pretty JSON
    pub async fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(CatteryError::config("Endpoint cannot be empty"));
        }
        if self.list_limit == 0 {
            return Err(CatteryError::config("List limit must be at least 1"));
        }
        Ok(())
    }

    /// The API key, failing with guidance when none is configured
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            CatteryError::config(
                "No API key configured. Set CATTERY_API_KEY or add \"api_key\" to the config file",
            )
        })
    }

    /// Join an endpoint path onto the configured base URL
    pub fn endpoint_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cattery")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.list_limit, 100);
    }

    #[test]
    fn test_endpoint_url_join() {
        let config = Config::default();
        assert_eq!(
            config.endpoint_url("/v1/votes"),
            "https://api.thecatapi.com/v1/votes"
        );

        let config = Config {
            endpoint: "https://api.example.test/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.endpoint_url("v1/images/upload"),
            "https://api.example.test/v1/images/upload"
        );
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = Config::default();
        assert!(config.require_api_key().is_err());

        let config = Config {
            api_key: Some("live_abc123".to_string()),
            ..Config::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "live_abc123");
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            endpoint: "https://api.example.test".to_string(),
            timeout: 10,
            api_key: Some("live_abc123".to_string()),
            list_limit: 25,
        };
        config.save(&path).await.unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "https://api.example.test");
        assert_eq!(loaded.timeout, 10);
        assert_eq!(loaded.list_limit, 25);
    }
}
