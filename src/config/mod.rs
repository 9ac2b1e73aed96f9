use crate::global;
use crate::zoom::ProviderCredentials;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Environment variables that override secrets from the config file.
pub mod config_env {
    pub const ACCOUNT_ID: &str = "ZOOM_ACCOUNT_ID";
    pub const CLIENT_ID: &str = "ZOOM_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "ZOOM_CLIENT_SECRET";
    pub const ACCESS_KEY: &str = "CANVAS_ZOOM_ACCESS_KEY";
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub zoom: ZoomConfig,
    pub access: AccessConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_base_url: String,
    pub token_url: String,
    /// Upper bound for every outbound request, in seconds.
    pub request_timeout_seconds: u64,
}

/// Inbound access-key gate for the HTTP API.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub require_access_key: bool,
    pub access_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: "https://api.zoom.us/v2".to_string(),
            token_url: "https://zoom.us/oauth/token".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3838,
        }
    }
}

impl ZoomConfig {
    /// Credentials for the client-credential grant, if all three are set.
    pub fn credentials(&self) -> Option<ProviderCredentials> {
        if self.account_id.is_empty() || self.client_id.is_empty() || self.client_secret.is_empty()
        {
            return None;
        }

        Some(ProviderCredentials {
            account_id: self.account_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

impl Config {
    /// Load from an explicit path, writing defaults there if the file is missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config.with_env_overrides());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config.with_env_overrides())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }

    fn with_env_overrides(mut self) -> Self {
        let overrides = [
            (config_env::ACCOUNT_ID, &mut self.zoom.account_id),
            (config_env::CLIENT_ID, &mut self.zoom.client_id),
            (config_env::CLIENT_SECRET, &mut self.zoom.client_secret),
            (config_env::ACCESS_KEY, &mut self.access.access_key),
        ];

        for (var, slot) in overrides {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }

        self
    }
}
