//! Resource limits and provider constants.

use std::time::Duration;

/// Smallest allowed number of rows or columns.
pub const MIN_GRID_DIMENSION: usize = 4;

/// Largest allowed number of rows or columns.
pub const MAX_GRID_DIMENSION: usize = 24;

/// Upper bound on rows * cols (one provider query per point).
pub const MAX_SAMPLE_POINTS: usize = 81;

/// Rows and columns used when the request does not specify them.
pub const DEFAULT_GRID_DIMENSION: i64 = 18;

/// Timeout for a single provider request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for the whole fan-out batch.
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum provider requests in flight at once.
pub const DEFAULT_MAX_CONNECTIONS: usize = 16;

/// Idle keep-alive connections retained by the HTTP client.
pub const DEFAULT_MAX_IDLE_CONNECTIONS: usize = 8;

/// Open-Meteo forecast endpoint.
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variable requested from the provider (wind speed at 100 m).
pub const WIND_SPEED_VARIABLE: &str = "wind_speed_100m";

/// Source identifier reported in response metadata.
pub const DATA_SOURCE: &str = "open-meteo";
