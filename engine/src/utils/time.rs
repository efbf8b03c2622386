//! Time utility functions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::TimeParseError;

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
///
/// Plain dates resolve to midnight UTC, so `2022-06-30` as an end bound covers
/// exactly `2022-06-30T00:00:00Z` and nothing later that day.
pub fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let ts = ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeParseError::Invalid(ts.to_string()))
}

/// Serde helper for optional timestamps in either accepted format.
///
/// Missing, `null` and blank values all deserialize to `None`.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
