//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use tangoagenda_core::agenda::{TangoEvent, Teacher};
use tangoagenda_core::storage::{
    EventQuery, EventRepository, RepositoryError, Result, TeacherRepository,
};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    events: Arc<RwLock<HashMap<String, TangoEvent>>>,
    teachers: Arc<RwLock<HashMap<String, Teacher>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            teachers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a clone of a live (non-deleted) event, or `NotFound`.
    fn live_event<'a>(
        events: &'a mut HashMap<String, TangoEvent>,
        id: &str,
    ) -> Result<&'a mut TangoEvent> {
        events
            .get_mut(id)
            .filter(|e| e.deleted_at.is_none())
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "Event",
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn get_event(&self, id: &str) -> Result<Option<TangoEvent>> {
        let events = self.events.read().await;
        Ok(events.get(id).filter(|e| e.deleted_at.is_none()).cloned())
    }

    async fn query_events(&self, query: &EventQuery) -> Result<Vec<TangoEvent>> {
        let events = self.events.read().await;
        Ok(query.apply(events.values()))
    }

    async fn create_event(&self, event: &TangoEvent) -> Result<()> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.clone(),
            });
        }
        events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &TangoEvent) -> Result<()> {
        let mut events = self.events.write().await;
        let stored = Self::live_event(&mut events, &event.id)?;
        *stored = event.clone();
        Ok(())
    }

    async fn set_event_active(&self, id: &str, active: bool) -> Result<()> {
        let mut events = self.events.write().await;
        let stored = Self::live_event(&mut events, id)?;
        stored.is_active = active;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn soft_delete_event(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let mut events = self.events.write().await;
        let stored = Self::live_event(&mut events, id)?;
        stored.deleted_at = Some(at);
        stored.updated_at = at;
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for InMemoryRepository {
    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let teachers = self.teachers.read().await;
        let mut list: Vec<Teacher> = teachers.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn get_teacher(&self, id: &str) -> Result<Option<Teacher>> {
        let teachers = self.teachers.read().await;
        Ok(teachers.get(id).cloned())
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<()> {
        let mut teachers = self.teachers.write().await;
        if teachers.contains_key(&teacher.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Teacher",
                id: teacher.id.clone(),
            });
        }
        teachers.insert(teacher.id.clone(), teacher.clone());
        Ok(())
    }

    async fn update_teacher(&self, teacher: &Teacher) -> Result<()> {
        let mut teachers = self.teachers.write().await;
        if !teachers.contains_key(&teacher.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Teacher",
                id: teacher.id.clone(),
            });
        }
        teachers.insert(teacher.id.clone(), teacher.clone());
        Ok(())
    }

    async fn delete_teacher(&self, id: &str) -> Result<()> {
        let mut teachers = self.teachers.write().await;
        if teachers.remove(id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Teacher",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
