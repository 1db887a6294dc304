//! Public agenda operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tangoagenda_core::agenda::{format_local_date, Occurrence};

use super::TangoAgendaClient;
use crate::error::{ClientError, Result};

/// Envelope wrapping every public agenda response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// The resolved agenda for a window.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgendaPage {
    pub events: Vec<Occurrence>,
    pub total: usize,
    pub has_more: bool,
}

/// Query parameters for the agenda listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl AgendaQuery {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: format_local_date(start),
            end_date: end.map(format_local_date),
        }
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T> {
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(ClientError::InvalidResponse(
            "server reported success: false".to_string(),
        ))
    }
}

impl TangoAgendaClient {
    /// Resolve the agenda for `[start, end]`.
    pub async fn agenda(&self, start: NaiveDate, end: Option<NaiveDate>) -> Result<AgendaPage> {
        let response = self
            .client
            .get(self.url("/api/events"))
            .query(&AgendaQuery::new(start, end))
            .send()
            .await?;
        unwrap_envelope(self.handle_response(response).await?)
    }

    /// Fetch one occurrence by plain or composite ID.
    pub async fn agenda_event(&self, id: &str) -> Result<Occurrence> {
        let response = self
            .client
            .get(self.url(&format!("/api/events/{}", id)))
            .send()
            .await?;
        unwrap_envelope(self.handle_response(response).await?)
    }
}
