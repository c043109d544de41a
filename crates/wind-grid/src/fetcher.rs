//! Single-point wind speed queries against the forecast provider.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, DurationRound, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use wind_common::{WindGridError, WindGridResult};

use crate::config::ProviderConfig;
use crate::limits::WIND_SPEED_VARIABLE;

/// Why a single point could not be measured.
///
/// These never fail a whole request; the affected cell is imputed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Malformed provider payload: {0}")]
    Malformed(String),

    #[error("No wind speed data returned")]
    EmptySeries,

    #[error("Fetch did not complete before the batch deadline")]
    Timeout,

    #[error("Fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Malformed(_) => "malformed",
            FetchError::EmptySeries => "empty_series",
            FetchError::Timeout => "timeout",
            FetchError::Aborted(_) => "aborted",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Capability to measure wind speed at one coordinate.
#[async_trait]
pub trait PointFetcher: Send + Sync {
    /// Fetch the current wind speed at `(lat, lon)`. Single attempt, no retry.
    async fn fetch(&self, lat: f64, lon: f64) -> Result<f64, FetchError>;
}

/// Hourly forecast payload returned by Open-Meteo.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
}

/// Parallel timestamp and value arrays.
#[derive(Debug, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default, rename = "wind_speed_100m")]
    pub wind_speed: Option<Vec<Option<f64>>>,
}

/// Open-Meteo backed point fetcher.
pub struct OpenMeteoFetcher {
    client: Client,
    base_url: String,
}

impl OpenMeteoFetcher {
    /// Build the shared HTTP client. Failure here prevents the batch from starting.
    pub fn new(config: &ProviderConfig) -> WindGridResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_connections)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| WindGridError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl PointFetcher for OpenMeteoFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, lat: f64, lon: f64) -> Result<f64, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", WIND_SPEED_VARIABLE.to_string()),
                ("forecast_days", "1".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload: ForecastResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let speed = extract_speed(payload, Utc::now())?;
        debug!(lat, lon, speed, "Fetched wind speed");
        Ok(speed)
    }
}

/// Pick the value for the current hour out of a forecast payload.
pub fn extract_speed(payload: ForecastResponse, now: DateTime<Utc>) -> Result<f64, FetchError> {
    let hourly = payload.hourly.unwrap_or_default();
    let speeds = match hourly.wind_speed {
        Some(speeds) if !speeds.is_empty() => speeds,
        _ => return Err(FetchError::EmptySeries),
    };

    let times = hourly.time.unwrap_or_default();
    let index = select_hour_index(&times, now);

    speeds
        .get(index)
        .copied()
        .flatten()
        .ok_or(FetchError::EmptySeries)
}

/// Index of the timestamp equal to `now` floored to the hour.
///
/// Both minute (`2024-01-15T13:00`) and second (`2024-01-15T13:00:00`)
/// precision timestamps are accepted.
/// Falls back to 0 when nothing matches, when the list is empty, or when
/// the current hour cannot be computed.
pub fn select_hour_index(times: &[String], now: DateTime<Utc>) -> usize {
    let Ok(current_hour) = now.duration_trunc(chrono::Duration::hours(1)) else {
        return 0;
    };
    let current_hour = current_hour.naive_utc();

    times
        .iter()
        .position(|t| parse_provider_time(t) == Some(current_hour))
        .unwrap_or(0)
}

fn parse_provider_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
