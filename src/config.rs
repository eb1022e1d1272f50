//! Configuration management for movierec
//!
//! Handles config file loading/saving and service URL resolution.
//! Config is stored at ~/.config/movierec/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service used when nothing else is configured
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the configured service URL
pub const SERVICE_URL_ENV: &str = "MOVIEREC_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog/recommendation service
    pub service_url: Option<String>,
    /// Per-request timeout in seconds (unset means no timeout)
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/movierec/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("movierec").join("config.toml"))
    }

    /// Load config from the default location, or return default if missing/unreadable
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the service URL with fallback chain:
    /// 1. `--url` flag
    /// 2. Environment variable MOVIEREC_URL
    /// 3. Config file
    /// 4. Built-in default
    pub fn service_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(SERVICE_URL_ENV).ok();
        pick_service_url(flag, env.as_deref(), self.service_url.as_deref())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// First non-blank candidate wins, trailing slashes removed
fn pick_service_url(flag: Option<&str>, env: Option<&str>, config: Option<&str>) -> String {
    [flag, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SERVICE_URL)
        .trim_end_matches('/')
        .to_string()
}
