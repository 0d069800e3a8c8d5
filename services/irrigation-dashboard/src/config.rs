//! Configuration types for the irrigation dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::i18n::Language;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub offline_cache: OfflineCacheConfig,
}

/// Where the irrigation server lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ServerConfig {
    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Humidity chart settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_capacity")]
    pub capacity: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            capacity: default_chart_capacity(),
        }
    }
}

/// Offline asset cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineCacheConfig {
    /// Versioned cache name; older names are dropped on activation
    #[serde(default = "default_cache_name")]
    pub name: String,
    #[serde(default = "default_cache_assets")]
    pub assets: Vec<String>,
    #[serde(default = "default_offline_port")]
    pub port: u16,
}

impl Default for OfflineCacheConfig {
    fn default() -> Self {
        Self {
            name: default_cache_name(),
            assets: default_cache_assets(),
            port: default_offline_port(),
        }
    }
}

impl Config {
    /// Reject values the controller cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.chart.capacity == 0 {
            return Err(crate::DashboardError::Config(
                "chart.capacity must be greater than zero".to_string(),
            ));
        }
        if self.server.base_url.trim().is_empty() {
            return Err(crate::DashboardError::Config(
                "server.base_url must not be empty".to_string(),
            ));
        }
        if self.offline_cache.name.trim().is_empty() {
            return Err(crate::DashboardError::Config(
                "offline_cache.name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_chart_capacity() -> usize {
    crate::series::DEFAULT_CAPACITY
}

fn default_cache_name() -> String {
    "fallahi-smartirrig-v1".to_string()
}

fn default_cache_assets() -> Vec<String> {
    [
        "/",
        "/dashboard",
        "/login",
        "/register",
        "/profile",
        "/notifications",
        "/guide",
        "/static/css/style.css",
        "/static/img/image.png",
        "/static/js/main.js",
        "/static/manifest.json",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_offline_port() -> u16 {
    5001
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DashboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
