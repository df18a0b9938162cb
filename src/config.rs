// src/config.rs
//! Unified configuration: environment variables first, optional config.yaml

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

const APP_DIR: &str = "cvforge";
const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub storage: StorageConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Where the profile slot lives.
    pub data_dir: PathBuf,
    /// Where exports land.
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    export_dir: Option<PathBuf>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl ConfigManager {
    /// Loads configuration. Environment variables win over config.yaml,
    /// which wins over built-in defaults.
    pub fn load() -> Result<Self> {
        let file = Self::load_file()?;

        let data_dir = Self::env_path("CVFORGE_DATA_DIR")
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);
        let export_dir = match Self::env_path("CVFORGE_EXPORT_DIR").or(file.export_dir) {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let endpoint = std::env::var("CVFORGE_ENDPOINT")
            .ok()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let api_key = std::env::var("CVFORGE_API_KEY")
            .ok()
            .or(file.api_key)
            .unwrap_or_default();
        let model = std::env::var("CVFORGE_MODEL")
            .ok()
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            storage: StorageConfig {
                data_dir,
                export_dir,
            },
            service: ServiceConfig {
                endpoint,
                api_key,
                model,
            },
        })
    }

    fn load_file() -> Result<ConfigFile> {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        info!("Loaded configuration from {}", config_path.display());
        Ok(file)
    }

    fn env_path(key: &str) -> Option<PathBuf> {
        std::env::var_os(key).map(PathBuf::from)
    }

    /// Ensures the data and export directories exist.
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.storage.data_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create data directory {}",
                    self.storage.data_dir.display()
                )
            })?;
        tokio::fs::create_dir_all(&self.storage.export_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create export directory {}",
                    self.storage.export_dir.display()
                )
            })?;
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn config_file_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push("config.yaml");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_are_app_scoped() {
        assert!(default_data_dir().ends_with(APP_DIR));
        assert!(config_file_path().ends_with("cvforge/config.yaml"));
    }

    #[test]
    fn test_config_file_parses_partial_yaml() {
        let file: ConfigFile = serde_yaml::from_str("model: test-model\n").unwrap();
        assert_eq!(file.model.as_deref(), Some("test-model"));
        assert!(file.api_key.is_none());
        assert!(file.data_dir.is_none());
    }

    #[test]
    fn test_empty_config_file_is_all_defaults() {
        let file: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert!(file.endpoint.is_none());
        assert!(file.export_dir.is_none());
    }
}
