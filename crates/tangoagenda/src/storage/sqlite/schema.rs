//! SQLite schema definitions and SQL query constants.
//!
//! Pure data plus the query builder for [`EventQuery`], no I/O.

use rusqlite::types::Value;
use tangoagenda_core::storage::{DateFilter, EventOrder, EventQuery};

use super::conversions::format_date;

/// SQL statement to create all tables.
///
/// The `payload` column holds the full event as JSON. The other event columns
/// are the ones queries filter and order on, and win over the payload on read.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    event_type TEXT NOT NULL,
    date TEXT NOT NULL,
    has_weekly_recurrence INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS teachers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    nickname TEXT,
    phone_number TEXT,
    bio TEXT,
    photo_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
CREATE INDEX IF NOT EXISTS idx_events_recurring ON events(has_weekly_recurrence, date);
CREATE INDEX IF NOT EXISTS idx_teachers_name ON teachers(name);
"#;

const EVENT_COLUMNS: &str = "id, date, has_weekly_recurrence, is_active, payload, created_at, updated_at, deleted_at";

// Event queries
pub const INSERT_EVENT: &str = r#"
INSERT INTO events (id, title, event_type, date, has_weekly_recurrence, is_active, payload, created_at, updated_at, deleted_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, date, has_weekly_recurrence, is_active, payload, created_at, updated_at, deleted_at
FROM events
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET title = ?2, event_type = ?3, date = ?4, has_weekly_recurrence = ?5, is_active = ?6, payload = ?7, updated_at = ?8
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SET_EVENT_ACTIVE: &str = r#"
UPDATE events
SET is_active = ?2, updated_at = ?3
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SOFT_DELETE_EVENT: &str = r#"
UPDATE events
SET deleted_at = ?2, updated_at = ?2
WHERE id = ?1 AND deleted_at IS NULL
"#;

// Teacher queries
pub const INSERT_TEACHER: &str = r#"
INSERT INTO teachers (id, name, nickname, phone_number, bio, photo_url, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_TEACHERS: &str = r#"
SELECT id, name, nickname, phone_number, bio, photo_url, created_at, updated_at
FROM teachers
ORDER BY name ASC, id ASC
"#;

pub const SELECT_TEACHER_BY_ID: &str = r#"
SELECT id, name, nickname, phone_number, bio, photo_url, created_at, updated_at
FROM teachers
WHERE id = ?1
"#;

pub const UPDATE_TEACHER: &str = r#"
UPDATE teachers
SET name = ?2, nickname = ?3, phone_number = ?4, bio = ?5, photo_url = ?6, updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_TEACHER: &str = r#"
DELETE FROM teachers
WHERE id = ?1
"#;

/// Builds the SELECT statement and its positional parameters for a query.
///
/// Mirrors `EventQuery::matches` and `EventQuery::apply`.
pub fn select_events(query: &EventQuery) -> (String, Vec<Value>) {
    let mut clauses = vec!["deleted_at IS NULL".to_string()];
    let mut params: Vec<Value> = Vec::new();

    if !query.include_inactive {
        clauses.push("is_active = 1".to_string());
    }

    match query.date {
        DateFilter::Any => {}
        DateFilter::On(day) => {
            params.push(Value::Text(format_date(&day)));
            clauses.push(format!("date = ?{}", params.len()));
        }
        DateFilter::Between(window) => {
            params.push(Value::Text(format_date(&window.start)));
            clauses.push(format!("date >= ?{}", params.len()));
            params.push(Value::Text(format_date(&window.end)));
            clauses.push(format!("date <= ?{}", params.len()));
        }
        DateFilter::Until(day) => {
            params.push(Value::Text(format_date(&day)));
            clauses.push(format!("date <= ?{}", params.len()));
        }
    }

    if let Some(weekly) = query.recurring {
        params.push(Value::Integer(weekly as i64));
        clauses.push(format!("has_weekly_recurrence = ?{}", params.len()));
    }

    let order = match query.order {
        EventOrder::Date => "date ASC, created_at ASC, id ASC",
        EventOrder::CreatedAt => "created_at ASC, id ASC",
    };

    let mut sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE {} ORDER BY {order}",
        clauses.join(" AND ")
    );

    if query.limit.is_some() || query.offset > 0 {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = query.limit.map(|l| l as i64).unwrap_or(-1);
        params.push(Value::Integer(limit));
        sql.push_str(&format!(" LIMIT ?{}", params.len()));
        params.push(Value::Integer(query.offset as i64));
        sql.push_str(&format!(" OFFSET ?{}", params.len()));
    }

    (sql, params)
}
