//! Common test fixtures for wind grid tests.

/// Common bounding box definitions, as `(min_lat, min_lon, max_lat, max_lon)`.
pub mod bbox {
    /// One-degree square used throughout the aggregation scenarios
    pub const UNIT_SQUARE: (f64, f64, f64, f64) = (10.0, 10.0, 11.0, 11.0);

    /// Greater London
    pub const LONDON: (f64, f64, f64, f64) = (51.28, -0.51, 51.69, 0.33);

    /// North Sea offshore wind zone
    pub const NORTH_SEA: (f64, f64, f64, f64) = (53.0, 1.0, 57.5, 8.0);

    /// Box straddling the equator and prime meridian
    pub const ORIGIN: (f64, f64, f64, f64) = (-2.0, -2.0, 2.0, 2.0);

    /// Inverted latitude (max_lat < min_lat)
    pub const INVERTED_LAT: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 11.0);

    /// Zero-width longitude range
    pub const FLAT_LON: (f64, f64, f64, f64) = (10.0, 10.0, 11.0, 10.0);
}

/// JSON body for `POST /wind-grid`.
pub fn wind_grid_request_json(
    bbox: (f64, f64, f64, f64),
    rows: Option<i64>,
    cols: Option<i64>,
) -> serde_json::Value {
    let (min_lat, min_lon, max_lat, max_lon) = bbox;
    let mut body = serde_json::json!({
        "min_lat": min_lat,
        "min_lon": min_lon,
        "max_lat": max_lat,
        "max_lon": max_lon,
    });
    if let Some(rows) = rows {
        body["rows"] = rows.into();
    }
    if let Some(cols) = cols {
        body["cols"] = cols.into();
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_json_omits_dimensions() {
        let body = wind_grid_request_json(bbox::UNIT_SQUARE, None, None);
        assert_eq!(body["min_lat"], 10.0);
        assert!(body.get("rows").is_none());
    }

    #[test]
    fn test_request_json_with_dimensions() {
        let body = wind_grid_request_json(bbox::LONDON, Some(6), Some(7));
        assert_eq!(body["rows"], 6);
        assert_eq!(body["cols"], 7);
    }
}
