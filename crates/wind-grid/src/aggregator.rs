//! Grid assembly, imputation and summary statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wind_common::{WindGridError, WindGridResult};

use crate::executor::SampleOutcome;
use crate::planner::GridSpec;

/// Dense row-major matrix of wind speeds; every cell holds a value.
pub type WindGrid = Vec<Vec<f64>>;

/// Statistics over successfully fetched (non-imputed) values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub min_speed: f64,
    pub max_speed: f64,
    pub avg_speed: f64,
    pub sample_count: usize,
}

/// Message carried by the error returned when no point could be fetched.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "Unable to retrieve wind data from provider";

/// Build the dense grid from per-point outcomes.
///
/// Negative speeds are clamped to zero before they are placed or counted.
/// Failed cells are filled with the mean of all successful values once every
/// outcome has been placed. Fails with `ProviderUnavailable` if nothing
/// succeeded.
pub fn aggregate(
    spec: GridSpec,
    outcomes: &[SampleOutcome],
) -> WindGridResult<(WindGrid, GridStats)> {
    let mut cells: Vec<Vec<Option<f64>>> = vec![vec![None; spec.cols]; spec.rows];
    let mut collected = Vec::with_capacity(outcomes.len());

    for sample in outcomes {
        let Ok(&raw) = sample.outcome.as_ref() else {
            continue;
        };
        let Some(cell) = cells
            .get_mut(sample.point.row)
            .and_then(|row| row.get_mut(sample.point.col))
        else {
            debug!(
                row = sample.point.row,
                col = sample.point.col,
                "Ignoring outcome outside the grid"
            );
            continue;
        };

        let speed = raw.max(0.0);
        *cell = Some(speed);
        collected.push(speed);
    }

    if collected.is_empty() {
        return Err(WindGridError::ProviderUnavailable(
            PROVIDER_UNAVAILABLE_MESSAGE.to_string(),
        ));
    }

    let sum: f64 = collected.iter().sum();
    let avg_speed = sum / collected.len() as f64;
    let min_speed = collected.iter().copied().fold(f64::INFINITY, f64::min);
    let max_speed = collected.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let grid: WindGrid = cells
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.unwrap_or(avg_speed)).collect())
        .collect();

    let stats = GridStats {
        min_speed,
        max_speed,
        avg_speed,
        sample_count: collected.len(),
    };

    debug!(
        rows = spec.rows,
        cols = spec.cols,
        imputed = spec.point_count().saturating_sub(stats.sample_count),
        "Aggregated wind grid"
    );

    Ok((grid, stats))
}
