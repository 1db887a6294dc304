use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::agenda::{TangoEvent, Teacher};

use super::{EventQuery, Result};

/// Repository for tango event operations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets a non-deleted event by its ID, active or not.
    async fn get_event(&self, id: &str) -> Result<Option<TangoEvent>>;

    /// Lists the events matching a query.
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<TangoEvent>>;

    /// Creates a new event.
    async fn create_event(&self, event: &TangoEvent) -> Result<()>;

    /// Updates an existing event.
    async fn update_event(&self, event: &TangoEvent) -> Result<()>;

    /// Shows or hides an event on the public agenda.
    async fn set_event_active(&self, id: &str, active: bool) -> Result<()>;

    /// Marks an event as deleted. The row is kept.
    async fn soft_delete_event(&self, id: &str, at: DateTime<Utc>) -> Result<()>;
}

/// Repository for teacher operations.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Lists every teacher, ordered by name.
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// Gets a teacher by their ID.
    async fn get_teacher(&self, id: &str) -> Result<Option<Teacher>>;

    /// Creates a new teacher.
    async fn create_teacher(&self, teacher: &Teacher) -> Result<()>;

    /// Updates an existing teacher.
    async fn update_teacher(&self, teacher: &Teacher) -> Result<()>;

    /// Deletes a teacher by their ID.
    async fn delete_teacher(&self, id: &str) -> Result<()>;
}
