//! Geographic bounding box for wind grid requests.

use serde::{Deserialize, Serialize};

use crate::error::{WindGridError, WindGridResult};

/// A geographic bounding box in degrees (WGS84 lat/lon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Reject boxes whose max edge is not strictly greater than the min edge.
    ///
    /// NaN coordinates fail the comparison and are rejected too.
    pub fn validate(&self) -> WindGridResult<()> {
        if !(self.max_lat > self.min_lat) {
            return Err(WindGridError::InvalidBbox(format!(
                "max_lat ({}) must be greater than min_lat ({})",
                self.max_lat, self.min_lat
            )));
        }
        if !(self.max_lon > self.min_lon) {
            return Err(WindGridError::InvalidBbox(format!(
                "max_lon ({}) must be greater than min_lon ({})",
                self.max_lon, self.min_lon
            )));
        }
        Ok(())
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let bbox = BoundingBox::new(10.0, 10.0, 11.0, 11.0);
        assert!(bbox.validate().is_ok());
        assert_eq!(bbox.lat_span(), 1.0);
        assert_eq!(bbox.lon_span(), 1.0);
    }

    #[test]
    fn test_validate_inverted_lat() {
        let bbox = BoundingBox::new(10.0, 10.0, 5.0, 11.0);
        let err = bbox.validate().unwrap_err();
        assert!(matches!(err, WindGridError::InvalidBbox(_)));
        assert!(err.to_string().contains("max_lat"));
    }
}
