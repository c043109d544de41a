//! Sample grid planning.
//!
//! Resolves the requested grid resolution against the resource limits and
//! lays out sample coordinates across the bounding box. Points are produced
//! in row-major order; downstream stages rely on the `(row, col)` indices
//! carried by each point rather than on completion order.

use serde::{Deserialize, Serialize};
use wind_common::{BoundingBox, WindGridResult};

use crate::limits::{MAX_GRID_DIMENSION, MAX_SAMPLE_POINTS, MIN_GRID_DIMENSION};

/// Resolved grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
}

impl GridSpec {
    /// Clamp requested dimensions into the allowed range, then shrink the
    /// larger side (rows on ties) until the point budget is met.
    pub fn resolve(requested_rows: i64, requested_cols: i64) -> Self {
        let mut rows = clamp_dimension(requested_rows);
        let mut cols = clamp_dimension(requested_cols);

        while rows * cols > MAX_SAMPLE_POINTS {
            if rows >= cols && rows > MIN_GRID_DIMENSION {
                rows -= 1;
            } else if cols > MIN_GRID_DIMENSION {
                cols -= 1;
            } else {
                break;
            }
        }

        Self { rows, cols }
    }

    /// Total number of sample points.
    pub fn point_count(&self) -> usize {
        self.rows * self.cols
    }
}

fn clamp_dimension(requested: i64) -> usize {
    requested.clamp(MIN_GRID_DIMENSION as i64, MAX_GRID_DIMENSION as i64) as usize
}

/// A single coordinate to query, tagged with its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub row: usize,
    pub col: usize,
    pub lat: f64,
    pub lon: f64,
}

/// Output of planning: resolved dimensions plus row-major sample points.
#[derive(Debug, Clone)]
pub struct SamplePlan {
    pub spec: GridSpec,
    pub points: Vec<SamplePoint>,
}

/// Plan the sample points for a bounding box.
///
/// Fails with `InvalidBbox` before any other work if the box is degenerate
/// or inverted.
pub fn plan(
    bbox: &BoundingBox,
    requested_rows: i64,
    requested_cols: i64,
) -> WindGridResult<SamplePlan> {
    bbox.validate()?;

    let spec = GridSpec::resolve(requested_rows, requested_cols);
    let lat_step = axis_step(bbox.lat_span(), spec.rows);
    let lon_step = axis_step(bbox.lon_span(), spec.cols);

    let mut points = Vec::with_capacity(spec.point_count());
    for row in 0..spec.rows {
        let lat = bbox.min_lat + lat_step * row as f64;
        for col in 0..spec.cols {
            let lon = bbox.min_lon + lon_step * col as f64;
            points.push(SamplePoint {
                row,
                col,
                lat: round6(lat),
                lon: round6(lon),
            });
        }
    }

    Ok(SamplePlan { spec, points })
}

fn axis_step(span: f64, dimension: usize) -> f64 {
    if dimension > 1 {
        span / (dimension - 1) as f64
    } else {
        0.0
    }
}

/// Round to 6 decimal places (~0.1 m).
fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
