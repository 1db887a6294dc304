//! Public agenda handlers.
//!
//! `GET /api/events` resolves the agenda for a window, `GET /api/events/{id}`
//! looks up a single occurrence by plain or composite ID.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use tangoagenda_core::agenda::{
    get_occurrence, parse_local_date, resolve_occurrences, Occurrence, ResolveError,
};

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

/// Query parameters of the agenda endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Success envelope of the public endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgendaPage {
    pub events: Vec<Occurrence>,
    pub total: usize,
    pub has_more: bool,
}

/// Resolve the agenda (GET /api/events?startDate=&endDate=).
pub async fn list_agenda(
    State(state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<Envelope<AgendaPage>>, AppError> {
    let start = query
        .start_date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(RequestError::MissingParameter("startDate"))?;
    let start = parse_local_date(start)?;
    let end = query
        .end_date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_local_date)
        .transpose()?;

    let events = resolve_occurrences(state.event_repo.as_ref(), start, end, state.pins())
        .await
        .inspect_err(|err| {
            if let ResolveError::UpstreamQuery(source) = err {
                tracing::error!(start = %start, end = ?end, error = %source, "Failed to resolve agenda");
            }
        })?;

    tracing::debug!(start = %start, end = ?end, count = events.len(), "Resolved agenda");

    let total = events.len();
    Ok(Json(Envelope::ok(AgendaPage {
        events,
        total,
        has_more: false,
    })))
}

/// Get one occurrence (GET /api/events/{id}).
pub async fn get_agenda_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Occurrence>>, AppError> {
    let occurrence = get_occurrence(state.event_repo.as_ref(), &id).await?;
    Ok(Json(Envelope::ok(occurrence)))
}
