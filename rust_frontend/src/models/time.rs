//! Venue-local civil time handling.
//!
//! Every timestamp the venue deals with is a wall-clock reading at the venue.
//! The REST API is not consistent about it: some endpoints send naive ISO
//! strings, others append an offset (`+05:00`) or `Z`. Offsets are dropped
//! rather than converted so that `10:00+05:00` stays `10:00` on the grid.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format used when sending timestamps back to the API.
pub const VENUE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire format for calendar dates (`?date=` filters, booking requests).
pub const VENUE_DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Error returned when a timestamp cannot be read as venue-local time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid venue timestamp '{0}'")]
pub struct TimestampError(pub String);

/// Parse a timestamp sent by the API into venue-local time.
pub fn parse_venue_datetime(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimestampError(raw.to_string()))
}

/// Parse a calendar date. Accepts a full timestamp too and keeps its date part.
pub fn parse_venue_date(raw: &str) -> Result<NaiveDate, TimestampError> {
    let trimmed = raw.trim();
    match trimmed.split_once('T') {
        Some((date, _)) => NaiveDate::parse_from_str(date, VENUE_DATE_FORMAT),
        None => NaiveDate::parse_from_str(trimmed, VENUE_DATE_FORMAT),
    }
    .map_err(|_| TimestampError(raw.to_string()))
}

/// Format a venue-local timestamp for the API.
pub fn format_venue_datetime(value: &NaiveDateTime) -> String {
    value.format(VENUE_DATETIME_FORMAT).to_string()
}

/// Combine a date and a wall-clock time picked in a form.
pub fn at_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// `HH:MM` label.
pub fn format_hhmm(value: &NaiveDateTime) -> String {
    value.format("%H:%M").to_string()
}

/// Length of `[start, end)` in minutes, keeping seconds and milliseconds as
/// the fractional part.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// Serde adapter for `NaiveDateTime` fields in venue-local time.
pub mod venue_datetime {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_venue_datetime(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_venue_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `NaiveDate` fields that may arrive as full timestamps.
pub mod venue_date {
    use super::*;

    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(VENUE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_venue_date(&raw).map_err(serde::de::Error::custom)
    }
}
