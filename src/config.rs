use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

/// Application configuration, loaded from `config.toml` when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "reviews.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` in the working directory,
    /// falling back to defaults if the file does not exist. A present but
    /// malformed file is an error, not a silent fallback.
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_PATH).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(CONFIG_PATH)
            .with_context(|| format!("failed to read {CONFIG_PATH}"))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse {CONFIG_PATH}"))?;

        Ok(config)
    }
}
