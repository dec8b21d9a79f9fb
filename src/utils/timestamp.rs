//! Lenient timestamp parsing for request bodies.
//!
//! Accepts RFC 3339 timestamps (`2030-01-01T10:00:00Z`, `2030-01-01T12:00:00+02:00`)
//! and offset-less ISO-8601 local timestamps (`2030-01-01T10:00:00`,
//! `2030-01-01T10:00`), which are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a timestamp in any of the accepted shapes.
///
/// # Errors
///
/// Returns a human-readable message when no format matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid timestamp '{raw}': expected ISO-8601"))
}

/// Serde adapter for `Option<DateTime<Utc>>` fields using [`parse_timestamp`].
///
/// Use together with `#[serde(default)]` so a missing field becomes `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc() {
        let parsed = parse_timestamp("2030-01-01T10:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2030-01-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_timestamp_as_utc() {
        let parsed = parse_timestamp("2030-01-01T10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_timestamp_with_fraction() {
        let parsed = parse_timestamp("2030-01-01T10:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_local_timestamp_without_seconds() {
        let parsed = parse_timestamp("2030-01-01T10:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("tomorrow").unwrap_err();
        assert!(err.contains("tomorrow"));
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_optional() {
        let missing: Payload = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());

        let null: Payload = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());

        let set: Payload = serde_json::from_str(r#"{"at": "2030-01-01T10:00:00"}"#).unwrap();
        assert!(set.at.is_some());

        assert!(serde_json::from_str::<Payload>(r#"{"at": "nope"}"#).is_err());
    }
}
