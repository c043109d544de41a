//! Error types for the wind grid pipeline.

use thiserror::Error;

/// Result type alias using WindGridError.
pub type WindGridResult<T> = Result<T, WindGridError>;

/// Errors that can reach the caller of a wind grid request.
///
/// Individual point fetch failures are not represented here: they are
/// recovered inside the pipeline and imputed in the returned grid.
#[derive(Debug, Error)]
pub enum WindGridError {
    // === Request Errors ===
    #[error("Invalid bounding box provided: {0}")]
    InvalidBbox(String),

    // === Provider Errors ===
    #[error("{0}")]
    ProviderUnavailable(String),

    // === Infrastructure Errors ===
    #[error("Failed to initialize provider client: {0}")]
    ClientInit(String),
}

impl WindGridError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WindGridError::InvalidBbox(_) => 400,
            WindGridError::ProviderUnavailable(_) => 502,
            WindGridError::ClientInit(_) => 500,
        }
    }

    /// Whether the error was caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }
}
