//! Service configuration.
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! or missing file yields the stock Open-Meteo setup.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::limits::{
    DEFAULT_BATCH_TIMEOUT, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MAX_IDLE_CONNECTIONS, OPEN_METEO_URL,
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Forecast provider and fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Forecast endpoint queried once per sample point
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Deadline for a whole fan-out batch
    #[serde(default = "default_batch_timeout_secs")]
    pub batch_timeout_secs: u64,
    /// Maximum provider requests in flight
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Idle keep-alive connections retained
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            batch_timeout_secs: default_batch_timeout_secs(),
            max_connections: default_max_connections(),
            max_idle_connections: default_max_idle_connections(),
        }
    }
}

impl ProviderConfig {
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_timeout_secs)
    }
}

fn default_base_url() -> String {
    OPEN_METEO_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

fn default_batch_timeout_secs() -> u64 {
    DEFAULT_BATCH_TIMEOUT.as_secs()
}

fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}

fn default_max_idle_connections() -> usize {
    DEFAULT_MAX_IDLE_CONNECTIONS
}

/// Cross-origin settings for the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; a single "*" allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_allowed_origins() -> Vec<String> {
    // Vite dev server
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl ServiceConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded service config");
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
