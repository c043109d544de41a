//! Concurrent fan-out of point fetches.
//!
//! Every sample point runs as its own task. A semaphore caps how many
//! provider calls are in flight and a single batch deadline bounds the whole
//! fan-out. Each task resolves to a value or a [`FetchError`]; one point
//! failing never cancels its siblings.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use wind_common::{WindGridError, WindGridResult};

use crate::config::ProviderConfig;
use crate::fetcher::{FetchError, PointFetcher};
use crate::planner::SamplePoint;

/// Result of fetching one sample point.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    pub point: SamplePoint,
    pub outcome: Result<f64, FetchError>,
}

impl SampleOutcome {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs a [`PointFetcher`] over many points with bounded concurrency.
#[derive(Debug, Clone)]
pub struct FanOutExecutor {
    max_connections: usize,
    batch_timeout: Duration,
}

impl FanOutExecutor {
    /// Create an executor. A zero connection cap or a zero deadline could
    /// never make progress and is rejected as a batch start failure.
    pub fn new(max_connections: usize, batch_timeout: Duration) -> WindGridResult<Self> {
        if max_connections == 0 {
            return Err(WindGridError::ClientInit(
                "connection pool size must be at least 1".to_string(),
            ));
        }
        if batch_timeout.is_zero() {
            return Err(WindGridError::ClientInit(
                "batch timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            max_connections,
            batch_timeout,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> WindGridResult<Self> {
        Self::new(config.max_connections, config.batch_timeout())
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }

    /// Fetch every point concurrently.
    ///
    /// Returns exactly one outcome per input point, in input order.
    pub async fn execute(
        &self,
        fetcher: Arc<dyn PointFetcher>,
        points: Vec<SamplePoint>,
    ) -> Vec<SampleOutcome> {
        let start = Instant::now();
        let deadline = batch_deadline(tokio::time::Instant::now(), self.batch_timeout);
        let semaphore = Arc::new(Semaphore::new(self.max_connections));

        debug!(
            points = points.len(),
            max_connections = self.max_connections,
            batch_timeout_ms = self.batch_timeout.as_millis() as u64,
            "Dispatching point fetches"
        );

        let handles: Vec<_> = points
            .iter()
            .map(|&point| {
                let fetcher = Arc::clone(&fetcher);
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let fetch = async {
                        let _permit = semaphore
                            .acquire()
                            .await
                            .map_err(|e| FetchError::Aborted(e.to_string()))?;
                        fetcher.fetch(point.lat, point.lon).await
                    };

                    match tokio::time::timeout_at(deadline, fetch).await {
                        Ok(result) => result,
                        Err(_) => Err(FetchError::Timeout),
                    }
                })
            })
            .collect();

        // Join in input order so each outcome stays paired with its point
        let mut outcomes = Vec::with_capacity(points.len());
        let mut failed = 0usize;

        for (point, handle) in points.into_iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(row = point.row, col = point.col, error = %e, "Fetch task panicked");
                    Err(FetchError::Aborted(e.to_string()))
                }
            };

            match &outcome {
                Ok(_) => {
                    counter!("wind_grid_points_total", "outcome" => "success").increment(1);
                }
                Err(e) => {
                    failed += 1;
                    counter!(
                        "wind_grid_points_total",
                        "outcome" => "failure",
                        "reason" => e.kind()
                    )
                    .increment(1);
                    debug!(
                        row = point.row,
                        col = point.col,
                        lat = point.lat,
                        lon = point.lon,
                        error = %e,
                        "Point fetch failed"
                    );
                }
            }

            outcomes.push(SampleOutcome { point, outcome });
        }

        let duration = start.elapsed();
        histogram!("wind_grid_batch_duration_ms").record(duration.as_secs_f64() * 1000.0);

        if failed > 0 {
            warn!(
                total = outcomes.len(),
                failed = failed,
                duration_ms = duration.as_millis() as u64,
                "Fan-out completed with failed points"
            );
        } else {
            info!(
                total = outcomes.len(),
                duration_ms = duration.as_millis() as u64,
                "Fan-out completed"
            );
        }

        outcomes
    }
}

/// `now + timeout`, saturating to a far-future instant on overflow.
fn batch_deadline(now: tokio::time::Instant, timeout: Duration) -> tokio::time::Instant {
    now.checked_add(timeout)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// Roughly 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);
