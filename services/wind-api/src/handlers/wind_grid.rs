//! POST /wind-grid

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Extension, Json};
use metrics::histogram;
use tracing::info;
use wind_grid::{WindGridRequest, WindGridResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Sample wind speed over the requested box and return the dense grid.
pub async fn wind_grid_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<WindGridRequest>,
) -> Result<Json<WindGridResponse>, ApiError> {
    let start = Instant::now();
    let response = state.service.wind_grid(&request).await?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    histogram!("wind_api_request_duration_ms").record(elapsed_ms);
    info!(
        rows = response.meta.rows,
        cols = response.meta.cols,
        samples = response.stats.sample_count,
        elapsed_ms,
        "Wind grid served"
    );

    Ok(Json(response))
}
