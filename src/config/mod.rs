//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::ConfigError;

/// HTTP shell settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address (e.g., "127.0.0.1:3000")
    #[validate(length(min = 1))]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Receipt upload settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UploadConfig {
    /// Extensions accepted by the file-format gate, compared case-sensitively
    #[validate(length(min = 1))]
    pub accepted_extensions: Vec<String>,

    /// Prefix of the URLs the mock store hands back for uploads
    #[validate(length(min = 1))]
    pub base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            base_url: "https://localhost:3456/images".to_string(),
        }
    }
}

/// Bill form settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BillsConfig {
    /// VAT percentage used when the form's pct is missing
    #[validate(range(min = 1, max = 100))]
    pub default_pct: u32,

    /// Seed the in-memory store with the demo bills
    pub seed_fixtures: bool,

    /// How long the bills page waits for the store before showing the
    /// loading state
    #[validate(range(min = 1))]
    pub list_timeout_ms: u64,
}

impl Default for BillsConfig {
    fn default() -> Self {
        Self {
            default_pct: 20,
            seed_fixtures: true,
            list_timeout_ms: 3000,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    #[serde(default)]
    #[validate(nested)]
    pub uploads: UploadConfig,

    #[serde(default)]
    #[validate(nested)]
    pub bills: BillsConfig,

    /// Fallback log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::Parse)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load from the file named by `BILLED_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var("BILLED_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path),
            Err(_) => Ok(Self::default_config()),
        }
    }

    /// Default configuration
    pub fn default_config() -> Self {
        Self {
            log_level: default_log_level(),
            ..Default::default()
        }
    }
}
