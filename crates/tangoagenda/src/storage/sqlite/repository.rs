//! SQLite repository implementation.
//!
//! Implements the repository traits from `tangoagenda_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;

use tangoagenda_core::agenda::{TangoEvent, Teacher};
use tangoagenda_core::storage::{
    EventQuery, EventRepository, RepositoryError, Result, TeacherRepository,
};

use super::conversions::{
    event_to_payload, format_date, format_datetime, row_to_event, row_to_teacher,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns "no row changed" into `QueryReturnedNoRows` so it maps to `NotFound`.
fn expect_changed(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for events and teachers.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// EventRepository implementation
// ============================================================================

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn get_event(&self, id: &str) -> Result<Option<TangoEvent>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_EVENT_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_event) {
                    Ok(event) => Ok(Some(event)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id))
    }

    async fn query_events(&self, query: &EventQuery) -> Result<Vec<TangoEvent>> {
        let (sql, params) = schema::select_events(query);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params), row_to_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event"))
    }

    async fn create_event(&self, event: &TangoEvent) -> Result<()> {
        let id = event.id.clone();
        let title = event.title.clone();
        let event_type = event.event_type.as_str();
        let date = format_date(&event.date);
        let weekly = event.has_weekly_recurrence;
        let active = event.is_active;
        let payload = event_to_payload(event)?;
        let created_at = format_datetime(&event.created_at);
        let updated_at = format_datetime(&event.updated_at);
        let deleted_at = event.deleted_at.as_ref().map(format_datetime);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_EVENT,
                    rusqlite::params![
                        id,
                        title,
                        event_type,
                        date,
                        weekly,
                        active,
                        payload,
                        created_at,
                        updated_at,
                        deleted_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", event.id.as_str()))
    }

    async fn update_event(&self, event: &TangoEvent) -> Result<()> {
        let id = event.id.clone();
        let title = event.title.clone();
        let event_type = event.event_type.as_str();
        let date = format_date(&event.date);
        let weekly = event.has_weekly_recurrence;
        let active = event.is_active;
        let payload = event_to_payload(event)?;
        let updated_at = format_datetime(&event.updated_at);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_EVENT,
                        rusqlite::params![
                            id, title, event_type, date, weekly, active, payload, updated_at
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", event.id.as_str()))
    }

    async fn set_event_active(&self, id: &str, active: bool) -> Result<()> {
        let id_str = id.to_string();
        let updated_at = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::SET_EVENT_ACTIVE,
                        rusqlite::params![id_str, active, updated_at],
                    )
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id))
    }

    async fn soft_delete_event(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let id_str = id.to_string();
        let deleted_at = format_datetime(&at);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::SOFT_DELETE_EVENT, rusqlite::params![id_str, deleted_at])
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id))
    }
}

// ============================================================================
// TeacherRepository implementation
// ============================================================================

#[async_trait]
impl TeacherRepository for SqliteRepository {
    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_TEACHERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_teacher).map_err(wrap_err)?;

                let mut teachers = Vec::new();
                for row_result in rows {
                    teachers.push(row_result.map_err(wrap_err)?);
                }
                Ok(teachers)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Teacher"))
    }

    async fn get_teacher(&self, id: &str) -> Result<Option<Teacher>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TEACHER_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_teacher) {
                    Ok(teacher) => Ok(Some(teacher)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Teacher", id))
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<()> {
        let t = teacher.clone();
        let created_at = format_datetime(&teacher.created_at);
        let updated_at = format_datetime(&teacher.updated_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TEACHER,
                    rusqlite::params![
                        t.id,
                        t.name,
                        t.nickname,
                        t.phone_number,
                        t.bio,
                        t.photo_url,
                        created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Teacher", teacher.id.as_str()))
    }

    async fn update_teacher(&self, teacher: &Teacher) -> Result<()> {
        let t = teacher.clone();
        let updated_at = format_datetime(&teacher.updated_at);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TEACHER,
                        rusqlite::params![
                            t.id,
                            t.name,
                            t.nickname,
                            t.phone_number,
                            t.bio,
                            t.photo_url,
                            updated_at
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Teacher", teacher.id.as_str()))
    }

    async fn delete_teacher(&self, id: &str) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TEACHER, [&id_str])
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Teacher", id))
    }
}
