//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;

use tangoagenda_core::agenda::{format_local_date, parse_local_date, TangoEvent, Teacher};
use tangoagenda_core::storage::RepositoryError;

// ============================================================================
// Event conversions
// ============================================================================

/// Convert a SQLite row to a TangoEvent.
///
/// Expected columns: id, date, has_weekly_recurrence, is_active, payload,
/// created_at, updated_at, deleted_at
pub fn row_to_event(row: &Row) -> rusqlite::Result<TangoEvent> {
    let id: String = row.get(0)?;
    let date: String = row.get(1)?;
    let has_weekly_recurrence: bool = row.get(2)?;
    let is_active: bool = row.get(3)?;
    let payload: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    let deleted_at: Option<String> = row.get(7)?;

    let mut event: TangoEvent = serde_json::from_str(&payload).map_err(|e| conversion_error(4, e))?;
    event.id = id;
    event.date = parse_date(&date)?;
    event.has_weekly_recurrence = has_weekly_recurrence;
    event.is_active = is_active;
    event.created_at = parse_datetime(&created_at)?;
    event.updated_at = parse_datetime(&updated_at)?;
    event.deleted_at = deleted_at.as_deref().map(parse_datetime).transpose()?;

    Ok(event)
}

/// Serialize an event to its JSON payload column.
pub fn event_to_payload(event: &TangoEvent) -> Result<String, RepositoryError> {
    serde_json::to_string(event).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

// ============================================================================
// Teacher conversions
// ============================================================================

/// Convert a SQLite row to a Teacher.
///
/// Expected columns: id, name, nickname, phone_number, bio, photo_url,
/// created_at, updated_at
pub fn row_to_teacher(row: &Row) -> rusqlite::Result<Teacher> {
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Teacher {
        id: row.get(0)?,
        name: row.get(1)?,
        nickname: row.get(2)?,
        phone_number: row.get(3)?,
        bio: row.get(4)?,
        photo_url: row.get(5)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

/// Parse a date from its `YYYY-MM-DD` column.
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    parse_local_date(s).map_err(|e| conversion_error(1, e))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(0, e))
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Fixed nanosecond precision keeps the text column sortable.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    format_local_date(*date)
}
