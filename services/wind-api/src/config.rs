//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use wind_grid::ServiceConfig;

/// Wind API Server
#[derive(Parser, Debug, Clone)]
#[command(name = "wind-api")]
#[command(about = "Samples wind speed over a bounding box into a dense grid")]
pub struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "WIND_API_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Optional YAML configuration file
    #[arg(short, long, env = "WIND_API_CONFIG")]
    pub config: Option<PathBuf>,

    /// Forecast provider endpoint
    #[arg(long, env = "OPEN_METEO_URL")]
    pub provider_url: Option<String>,

    /// Maximum provider requests in flight per grid
    #[arg(long, env = "WIND_API_MAX_CONNECTIONS")]
    pub max_connections: Option<usize>,

    /// Deadline for fetching one grid, in seconds
    #[arg(long, env = "WIND_API_BATCH_TIMEOUT_SECS")]
    pub batch_timeout_secs: Option<u64>,

    /// Comma-separated CORS origins ("*" allows any)
    #[arg(long, env = "WIND_API_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Number of worker threads
    #[arg(long, env = "WIND_API_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

impl Args {
    /// Load the configuration file (if any) and apply command-line overrides.
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::load_or_default(self.config.as_deref())?;
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Flags given on the command line or in the environment win over file values.
    pub fn apply_overrides(&self, config: &mut ServiceConfig) -> Result<()> {
        if let Some(url) = &self.provider_url {
            config.provider.base_url = url.clone();
        }
        if let Some(max) = self.max_connections {
            if max == 0 {
                bail!("--max-connections must be at least 1");
            }
            config.provider.max_connections = max;
        }
        if let Some(secs) = self.batch_timeout_secs {
            if secs == 0 {
                bail!("--batch-timeout-secs must be at least 1");
            }
            config.provider.batch_timeout_secs = secs;
        }
        if let Some(origins) = &self.cors_origins {
            let origins: Vec<String> = origins
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                config.cors.allowed_origins = origins;
            }
        }

        info!(
            provider = %config.provider.base_url,
            max_connections = config.provider.max_connections,
            batch_timeout_secs = config.provider.batch_timeout_secs,
            origins = ?config.cors.allowed_origins,
            "Configuration resolved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wind-api", "--listen", "127.0.0.1:9000"]).unwrap();
        assert_eq!(args.listen, "127.0.0.1:9000");

        let mut config = ServiceConfig::default();
        let before = config.provider.max_connections;
        Args {
            provider_url: None,
            max_connections: None,
            batch_timeout_secs: None,
            cors_origins: None,
            ..args
        }
        .apply_overrides(&mut config)
        .unwrap();
        assert_eq!(config.provider.max_connections, before);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wind-api",
            "--provider-url",
            "http://127.0.0.1:1234/v1/forecast",
            "--max-connections",
            "4",
            "--batch-timeout-secs",
            "3",
            "--cors-origins",
            "http://a.test, http://b.test",
        ])
        .unwrap();

        let mut config = ServiceConfig::default();
        args.apply_overrides(&mut config).unwrap();

        assert_eq!(config.provider.base_url, "http://127.0.0.1:1234/v1/forecast");
        assert_eq!(config.provider.max_connections, 4);
        assert_eq!(config.provider.batch_timeout_secs, 3);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_zero_connections_rejected() {
        let args = Args::try_parse_from(["wind-api", "--max-connections", "0"]).unwrap();
        let mut config = ServiceConfig::default();
        assert!(args.apply_overrides(&mut config).is_err());
    }

    #[test]
    fn test_zero_batch_timeout_rejected() {
        let args = Args::try_parse_from(["wind-api", "--batch-timeout-secs", "0"]).unwrap();
        let mut config = ServiceConfig::default();
        assert!(args.apply_overrides(&mut config).is_err());
    }
}
