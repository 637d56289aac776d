//! ISO-8601 timestamp parsing into destination epoch milliseconds

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a source timestamp into milliseconds since the Unix epoch
///
/// Accepts RFC 3339 (with offset), naive date-times (read as UTC) and plain
/// dates (UTC midnight). Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z"), Some(1_704_067_200_000));
    }

    #[test]
    fn test_parse_rfc3339_with_offset_and_fraction() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00.250+02:00"),
            Some(1_704_067_200_250)
        );
    }

    #[test]
    fn test_parse_naive_forms_as_utc() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(1_704_067_200_000));
        assert_eq!(parse_timestamp("2024-01-01 00:01"), Some(1_704_067_260_000));
        assert_eq!(parse_timestamp("2024-01-01"), Some(1_704_067_200_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }
}
