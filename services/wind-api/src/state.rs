//! Application state for the Wind API.

use anyhow::Result;
use wind_grid::{ServiceConfig, WindGridService};

/// Shared application state.
pub struct AppState {
    /// Grid pipeline, holding the shared provider client.
    pub service: WindGridService,

    /// Resolved configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Build state backed by the configured provider.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let service = WindGridService::new(&config.provider)?;
        Ok(Self::with_service(service, config))
    }

    /// Build state around an existing service.
    pub fn with_service(service: WindGridService, config: ServiceConfig) -> Self {
        Self { service, config }
    }
}
