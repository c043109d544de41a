//! Router construction.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use wind_grid::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the service router.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_router(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    let cors = cors_layer(&state.config.cors);

    let mut app = Router::new()
        .route("/wind-grid", post(handlers::wind_grid::wind_grid_handler))
        .route("/health", get(handlers::health::health_handler));

    if let Some(handle) = prometheus {
        app = app
            .route("/metrics", get(handlers::health::metrics_handler))
            .layer(Extension(handle));
    }

    app.layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// CORS for the configured origins.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using wildcards. A `*` origin falls back to fully
/// permissive CORS without credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
