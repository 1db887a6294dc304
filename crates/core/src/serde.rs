//! Serde helper functions for admin form payloads and query strings.
//!
//! Forms submit empty strings for untouched optional fields; these helpers
//! read them as `None`. Dates always go through
//! [`parse_local_date`](crate::agenda::parse_local_date).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

use crate::agenda::parse_local_date;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a `YYYY-MM-DD` date.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_local_date(&s).map_err(serde::de::Error::custom)
}

/// Deserialize an optional `YYYY-MM-DD` date, treating empty strings as None.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_local_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

/// Deserialize a time of day. Accepts `HH:MM` or `HH:MM:SS`.
pub fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_time(&s).map_err(serde::de::Error::custom)
}

/// Deserialize an optional time of day, treating empty strings as None.
/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_time(&s).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
