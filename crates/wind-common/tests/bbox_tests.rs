//! Tests for BoundingBox validation and geometry helpers.

use wind_common::{BoundingBox, WindGridError};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-10.0, 20.0, 15.0, 40.0);
    assert_eq!(bbox.min_lat, -10.0);
    assert_eq!(bbox.min_lon, 20.0);
    assert_eq!(bbox.max_lat, 15.0);
    assert_eq!(bbox.max_lon, 40.0);
}

#[test]
fn test_bbox_copy() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

// ============================================================================
// validate tests
// ============================================================================

#[test]
fn test_validate_accepts_regular_box() {
    assert!(BoundingBox::new(51.0, -1.0, 52.0, 0.5).validate().is_ok());
}

#[test]
fn test_validate_accepts_tiny_box() {
    assert!(BoundingBox::new(10.0, 10.0, 10.000001, 10.000001)
        .validate()
        .is_ok());
}

#[test]
fn test_validate_rejects_inverted_latitude() {
    let err = BoundingBox::new(10.0, 10.0, 5.0, 11.0).validate().unwrap_err();
    assert!(matches!(err, WindGridError::InvalidBbox(_)));
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn test_validate_rejects_inverted_longitude() {
    let err = BoundingBox::new(10.0, 12.0, 11.0, 11.0).validate().unwrap_err();
    assert!(err.to_string().contains("max_lon"));
}

#[test]
fn test_validate_rejects_zero_height() {
    assert!(BoundingBox::new(10.0, 10.0, 10.0, 11.0).validate().is_err());
}

#[test]
fn test_validate_rejects_zero_width() {
    assert!(BoundingBox::new(10.0, 10.0, 11.0, 10.0).validate().is_err());
}

#[test]
fn test_validate_rejects_nan() {
    assert!(BoundingBox::new(f64::NAN, 10.0, 11.0, 11.0).validate().is_err());
    assert!(BoundingBox::new(10.0, 10.0, 11.0, f64::NAN).validate().is_err());
}

// ============================================================================
// Geometry helpers
// ============================================================================

#[test]
fn test_spans() {
    let bbox = BoundingBox::new(-5.0, -20.0, 5.0, 10.0);
    assert_eq!(bbox.lat_span(), 10.0);
    assert_eq!(bbox.lon_span(), 30.0);
}

#[test]
fn test_serde_field_names() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_value(bbox).unwrap();
    assert_eq!(json["min_lat"], 1.0);
    assert_eq!(json["min_lon"], 2.0);
    assert_eq!(json["max_lat"], 3.0);
    assert_eq!(json["max_lon"], 4.0);
}
