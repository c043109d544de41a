//! Mapping of pipeline errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};
use wind_common::WindGridError;

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Handler error wrapping the pipeline taxonomy.
#[derive(Debug)]
pub struct ApiError(pub WindGridError);

impl From<WindGridError> for ApiError {
    fn from(err: WindGridError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        } else {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        }

        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
