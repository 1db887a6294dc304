//! Admin event operations.

use serde::{Deserialize, Serialize};
use tangoagenda_core::agenda::{CreateEventRequest, TangoEvent, UpdateEventRequest};

use super::TangoAgendaClient;
use crate::error::Result;

/// Query parameters for the admin listing.
#[derive(Debug, Default, Serialize)]
pub struct ListEventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// One page of stored events.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<TangoEvent>,
    pub has_more: bool,
}

/// Weekly events grouped under one weekday.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeekdayGroup {
    pub weekday: String,
    pub label: String,
    pub events: Vec<TangoEvent>,
}

impl TangoAgendaClient {
    /// List stored events ordered by date.
    pub async fn list_events(&self, query: ListEventsQuery) -> Result<EventPage> {
        let response = self
            .client
            .get(self.url("/api/admin/events"))
            .query(&query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Weekly events grouped by weekday, starting from today.
    pub async fn recurring_by_weekday(&self) -> Result<Vec<WeekdayGroup>> {
        let response = self
            .client
            .get(self.url("/api/admin/events/recurring-by-weekday"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new event.
    pub async fn create_event(&self, req: &CreateEventRequest) -> Result<TangoEvent> {
        let response = self
            .client
            .post(self.url("/api/admin/events"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get a stored event by ID.
    pub async fn get_event(&self, id: &str) -> Result<TangoEvent> {
        let response = self
            .client
            .get(self.url(&format!("/api/admin/events/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an event.
    pub async fn update_event(&self, id: &str, req: &UpdateEventRequest) -> Result<TangoEvent> {
        let response = self
            .client
            .put(self.url(&format!("/api/admin/events/{}", id)))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Flip the active flag of an event.
    pub async fn toggle_event(&self, id: &str) -> Result<TangoEvent> {
        let response = self
            .client
            .patch(self.url(&format!("/api/admin/events/{}/toggle", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Soft-delete an event.
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/admin/events/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
