//! End-to-end wind grid request handling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use wind_common::{BoundingBox, WindGridResult};

use crate::aggregator::{aggregate, GridStats, WindGrid};
use crate::config::ProviderConfig;
use crate::executor::FanOutExecutor;
use crate::fetcher::{OpenMeteoFetcher, PointFetcher};
use crate::limits::{DATA_SOURCE, DEFAULT_GRID_DIMENSION};
use crate::planner::plan;

/// Inbound request: bounding box plus desired grid resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindGridRequest {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    #[serde(default = "default_dimension")]
    pub rows: i64,
    #[serde(default = "default_dimension")]
    pub cols: i64,
}

fn default_dimension() -> i64 {
    DEFAULT_GRID_DIMENSION
}

impl WindGridRequest {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)
    }
}

/// Request metadata echoed back with the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMeta {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub rows: usize,
    pub cols: usize,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

/// Dense grid, its statistics and request metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindGridResponse {
    pub meta: GridMeta,
    pub grid: WindGrid,
    pub stats: GridStats,
}

/// Plans, fetches and aggregates wind grids.
pub struct WindGridService {
    fetcher: Arc<dyn PointFetcher>,
    executor: FanOutExecutor,
}

impl WindGridService {
    /// Create a service backed by Open-Meteo.
    pub fn new(config: &ProviderConfig) -> WindGridResult<Self> {
        let fetcher = OpenMeteoFetcher::new(config)?;
        let executor = FanOutExecutor::from_config(config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), executor))
    }

    /// Create a service around any point fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PointFetcher>, executor: FanOutExecutor) -> Self {
        Self { fetcher, executor }
    }

    pub fn executor(&self) -> &FanOutExecutor {
        &self.executor
    }

    /// Produce a dense wind grid for the requested box.
    ///
    /// Box validation happens before any provider call.
    #[instrument(skip(self, request), fields(
        min_lat = request.min_lat,
        min_lon = request.min_lon,
        max_lat = request.max_lat,
        max_lon = request.max_lon
    ))]
    pub async fn wind_grid(&self, request: &WindGridRequest) -> WindGridResult<WindGridResponse> {
        let bbox = request.bbox();
        let sample_plan = match plan(&bbox, request.rows, request.cols) {
            Ok(sample_plan) => sample_plan,
            Err(e) => {
                counter!("wind_grid_requests_total", "outcome" => "rejected").increment(1);
                warn!(error = %e, "Rejected wind grid request");
                return Err(e);
            }
        };
        let spec = sample_plan.spec;

        info!(
            requested_rows = request.rows,
            requested_cols = request.cols,
            rows = spec.rows,
            cols = spec.cols,
            "Sampling wind grid"
        );

        let outcomes = self
            .executor
            .execute(Arc::clone(&self.fetcher), sample_plan.points)
            .await;

        let (grid, stats) = match aggregate(spec, &outcomes) {
            Ok(result) => result,
            Err(e) => {
                counter!("wind_grid_requests_total", "outcome" => "provider_unavailable")
                    .increment(1);
                warn!(error = %e, points = outcomes.len(), "No wind data retrieved");
                return Err(e);
            }
        };
        counter!("wind_grid_requests_total", "outcome" => "success").increment(1);

        info!(
            sample_count = stats.sample_count,
            avg_speed = stats.avg_speed,
            "Wind grid complete"
        );

        Ok(WindGridResponse {
            meta: GridMeta {
                min_lat: bbox.min_lat,
                max_lat: bbox.max_lat,
                min_lon: bbox.min_lon,
                max_lon: bbox.max_lon,
                rows: spec.rows,
                cols: spec.cols,
                source: DATA_SOURCE.to_string(),
                fetched_at: Utc::now(),
            },
            grid,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: WindGridRequest = serde_json::from_str(
            r#"{"min_lat": 1.0, "min_lon": 2.0, "max_lat": 3.0, "max_lon": 4.0}"#,
        )
        .unwrap();
        assert_eq!(request.rows, 18);
        assert_eq!(request.cols, 18);
        assert_eq!(request.bbox(), BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[tokio::test]
    async fn test_new_with_default_config() {
        let service = WindGridService::new(&ProviderConfig::default()).unwrap();
        assert_eq!(service.executor().max_connections(), 16);
    }
}
