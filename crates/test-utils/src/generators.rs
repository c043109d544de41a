//! Generators for Open-Meteo style forecast payloads.
//!
//! Payloads mirror the provider's hourly response: a `time` array of naive
//! UTC timestamps (`%Y-%m-%dT%H:%M`) parallel to a `wind_speed_100m` array.

use chrono::{DateTime, Duration, DurationRound, Utc};

/// Timestamp format used by the provider.
pub const PROVIDER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Hourly timestamps starting at midnight of `now`'s UTC day.
///
/// `count` of 24 matches a `forecast_days=1` response.
pub fn hourly_times(now: DateTime<Utc>, count: usize) -> Vec<String> {
    let midnight = now.duration_trunc(Duration::days(1)).unwrap_or(now);
    (0..count)
        .map(|h| {
            (midnight + Duration::hours(h as i64))
                .format(PROVIDER_TIME_FORMAT)
                .to_string()
        })
        .collect()
}

/// Build a forecast payload from parallel time and speed arrays.
pub fn forecast_payload(times: &[String], speeds: &[Option<f64>]) -> serde_json::Value {
    serde_json::json!({
        "latitude": 10.0,
        "longitude": 10.0,
        "timezone": "UTC",
        "hourly_units": { "time": "iso8601", "wind_speed_100m": "km/h" },
        "hourly": {
            "time": times,
            "wind_speed_100m": speeds,
        }
    })
}

/// A 24-hour payload where the current UTC hour holds `current` and every
/// other hour holds `other`.
pub fn current_hour_payload(now: DateTime<Utc>, current: f64, other: f64) -> serde_json::Value {
    let times = hourly_times(now, 24);
    let current_hour = now
        .duration_trunc(Duration::hours(1))
        .unwrap_or(now)
        .format(PROVIDER_TIME_FORMAT)
        .to_string();
    let speeds: Vec<Option<f64>> = times
        .iter()
        .map(|t| Some(if *t == current_hour { current } else { other }))
        .collect();
    forecast_payload(&times, &speeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hourly_times() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 13, 45, 0).unwrap();
        let times = hourly_times(now, 24);
        assert_eq!(times.len(), 24);
        assert_eq!(times[0], "2024-01-15T00:00");
        assert_eq!(times[13], "2024-01-15T13:00");
    }

    #[test]
    fn test_current_hour_payload() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 13, 45, 0).unwrap();
        let payload = current_hour_payload(now, 9.5, 1.0);
        let speeds = payload["hourly"]["wind_speed_100m"].as_array().unwrap();
        assert_eq!(speeds[13], 9.5);
        assert_eq!(speeds[0], 1.0);
    }
}
