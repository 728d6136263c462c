//! Configuration Management
//!
//! Handles persistent defaults for enum-lightsail.

use crate::session::FileSession;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// AWS shared-config profile
    #[serde(default)]
    pub profile: Option<String>,
    /// Regions to enumerate instead of discovering them
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    /// Lightsail endpoint used for every region
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Session file location
    #[serde(default)]
    pub session_path: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("enum-lightsail").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file; missing or unreadable files
    /// yield the defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective profile (CLI/config > AWS_PROFILE)
    pub fn effective_profile(&self) -> Option<String> {
        self.profile
            .clone()
            .or_else(|| std::env::var("AWS_PROFILE").ok())
            .filter(|p| !p.is_empty())
    }

    /// Explicit regions, if any were configured
    pub fn effective_regions(&self) -> Option<Vec<String>> {
        self.regions
            .as_ref()
            .map(|regions| {
                regions
                    .iter()
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|regions| !regions.is_empty())
    }

    pub fn effective_session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(FileSession::default_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Endpoint override, checked to be an http(s) URL
    pub fn validated_endpoint(&self) -> Result<Option<String>> {
        let Some(endpoint) = &self.endpoint_url else {
            return Ok(None);
        };

        let url = Url::parse(endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Endpoint URL must use http or https: {}", endpoint);
        }

        Ok(Some(url.to_string()))
    }
}
