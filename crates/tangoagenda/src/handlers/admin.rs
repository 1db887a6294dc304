//! Admin event handlers.
//!
//! The admin sees inactive events too. Deletion is soft: the row stays in the
//! store but disappears from every listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use tangoagenda_core::agenda::{
    group_recurring_by_weekday, validate_event, CreateEventRequest, TangoEvent,
    UpdateEventRequest, WeekdayGroup,
};
use tangoagenda_core::storage::{EventQuery, RepositoryError};

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

/// Query parameters for the admin listing.
#[derive(Debug, Default, Deserialize)]
pub struct AdminListQuery {
    /// Only weekly (`true`) or only one-off (`false`) events.
    pub recurring: Option<bool>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AdminEventPage {
    pub events: Vec<TangoEvent>,
    pub has_more: bool,
}

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Event",
        id: id.to_string(),
    }
}

async fn load_event(state: &AppState, id: &str) -> Result<TangoEvent, AppError> {
    Ok(state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| not_found(id))?)
}

/// List events (GET /api/admin/events).
///
/// Without `offset` or `limit` everything is returned. With only `offset`,
/// the configured default page size applies.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<AdminEventPage>, AppError> {
    if query.limit == Some(0) {
        return Err(RequestError::InvalidParameter {
            name: "limit",
            value: "0".to_string(),
        }
        .into());
    }

    let limit = match (query.offset, query.limit) {
        (_, Some(limit)) => Some(limit),
        (Some(_), None) => Some(state.config.default_admin_page_size),
        (None, None) => None,
    };
    let offset = query.offset.unwrap_or(0);

    // One extra row tells whether another page exists.
    let store_query = EventQuery::admin()
        .with_recurring(query.recurring)
        .paginate(offset, limit.map(|l| l.saturating_add(1)));
    let mut events = state.event_repo.query_events(&store_query).await?;

    let has_more = limit.is_some_and(|l| events.len() > l);
    if let Some(l) = limit {
        events.truncate(l);
    }

    Ok(Json(AdminEventPage { events, has_more }))
}

/// Recurring events grouped by weekday, starting from today
/// (GET /api/admin/events/recurring-by-weekday).
pub async fn list_recurring_by_weekday(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeekdayGroup>>, AppError> {
    let today = Local::now().date_naive();
    let events = state
        .event_repo
        .query_events(&EventQuery::admin().with_recurring(Some(true)))
        .await?;

    Ok(Json(group_recurring_by_weekday(&events, today.weekday())))
}

/// Create a new event (POST /api/admin/events).
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<TangoEvent>), AppError> {
    let event = payload.into_event();
    validate_event(&event)?;

    state.event_repo.create_event(&event).await?;

    tracing::info!(event_id = %event.id, date = %event.date, weekly = event.has_weekly_recurrence, "Created event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event, active or not (GET /api/admin/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TangoEvent>, AppError> {
    Ok(Json(load_event(&state, &id).await?))
}

/// Update an event (PUT /api/admin/events/{id}).
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<TangoEvent>, AppError> {
    let mut event = load_event(&state, &id).await?;
    payload.apply_to(&mut event);
    validate_event(&event)?;

    state.event_repo.update_event(&event).await?;

    tracing::info!(event_id = %id, "Updated event");

    Ok(Json(event))
}

/// Flip the active flag (PATCH /api/admin/events/{id}/toggle).
pub async fn toggle_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TangoEvent>, AppError> {
    let event = load_event(&state, &id).await?;
    let active = !event.is_active;

    state.event_repo.set_event_active(&id, active).await?;

    tracing::info!(event_id = %id, active, "Toggled event");

    Ok(Json(load_event(&state, &id).await?))
}

/// Soft delete an event (DELETE /api/admin/events/{id}).
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.event_repo.soft_delete_event(&id, Utc::now()).await?;

    tracing::info!(event_id = %id, "Deleted event");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{app::create_app, state::AppState};

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(app: &Router, body: Value) -> String {
        let (status, json) = send(app, "POST", "/api/admin/events", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let app = create_app(AppState::default());

        let id = create(
            &app,
            json!({
                "title": "Milonga La Calesita",
                "event_type": "milonga",
                "date": "2024-01-05",
                "has_weekly_recurrence": true,
                "venue_name": "",
                "milonga_pre_class": { "class_time": "21:00", "class_level": "all_levels" }
            }),
        )
        .await;

        let (status, json) = send(&app, "GET", &format!("/api/admin/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Milonga La Calesita");
        assert_eq!(json["has_weekly_recurrence"], true);
        assert!(json.get("venue_name").is_none());
        assert_eq!(json["milonga_pre_class"]["class_time"], "21:00:00");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_event() {
        let app = create_app(AppState::default());

        let (status, json) = send(
            &app,
            "POST",
            "/api/admin/events",
            Some(json!({ "title": "  ", "event_type": "class", "date": "2024-01-05" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Event title cannot be empty");
    }

    #[tokio::test]
    async fn test_update_event() {
        let app = create_app(AppState::default());
        let id = create(
            &app,
            json!({ "title": "Clase", "event_type": "class", "date": "2024-01-03", "venue_name": "La Viruta" }),
        )
        .await;

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/admin/events/{id}"),
            Some(json!({ "title": "Clase de Vals", "venue_name": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Clase de Vals");
        assert!(json.get("venue_name").is_none());

        let (status, _) = send(
            &app,
            "PUT",
            "/api/admin/events/missing",
            Some(json!({ "title": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_hides_event_from_public_agenda() {
        let app = create_app(AppState::default());
        let id = create(
            &app,
            json!({ "title": "Milonga", "event_type": "milonga", "date": "2024-03-10" }),
        )
        .await;

        let (status, json) = send(&app, "PATCH", &format!("/api/admin/events/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_active"], false);

        let (_, agenda) = send(&app, "GET", "/api/events?startDate=2024-03-10", None).await;
        assert_eq!(agenda["data"]["total"], 0);

        let (_, listing) = send(&app, "GET", "/api/admin/events", None).await;
        assert_eq!(listing["events"].as_array().unwrap().len(), 1);

        let (_, json) = send(&app, "PATCH", &format!("/api/admin/events/{id}/toggle"), None).await;
        assert_eq!(json["is_active"], true);
    }

    #[tokio::test]
    async fn test_delete_event_is_soft() {
        let app = create_app(AppState::default());
        let id = create(
            &app,
            json!({ "title": "Milonga", "event_type": "milonga", "date": "2024-03-10" }),
        )
        .await;

        let (status, _) = send(&app, "DELETE", &format!("/api/admin/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/api/admin/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", &format!("/api/admin/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_pagination_and_recurring_filter() {
        let app = create_app(AppState::default());
        for day in 1..=7 {
            create(
                &app,
                json!({
                    "title": format!("Evento {day}"),
                    "event_type": "milonga",
                    "date": format!("2024-01-0{day}"),
                    "has_weekly_recurrence": day <= 2,
                }),
            )
            .await;
        }

        let (_, page) = send(&app, "GET", "/api/admin/events?offset=0", None).await;
        assert_eq!(page["events"].as_array().unwrap().len(), 5);
        assert_eq!(page["has_more"], true);
        assert_eq!(page["events"][0]["title"], "Evento 1");

        let (_, page) = send(&app, "GET", "/api/admin/events?offset=5&limit=5", None).await;
        assert_eq!(page["events"].as_array().unwrap().len(), 2);
        assert_eq!(page["has_more"], false);

        let (_, weekly) = send(&app, "GET", "/api/admin/events?recurring=true", None).await;
        assert_eq!(weekly["events"].as_array().unwrap().len(), 2);
        assert_eq!(weekly["has_more"], false);

        let (_, one_off) = send(&app, "GET", "/api/admin/events?recurring=false", None).await;
        assert_eq!(one_off["events"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_list_rejects_zero_limit() {
        let app = create_app(AppState::default());

        let (status, json) = send(&app, "GET", "/api/admin/events?limit=0", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid value for limit: 0");
    }

    #[tokio::test]
    async fn test_recurring_by_weekday_groups() {
        let app = create_app(AppState::default());
        // 2024-01-01 is a Monday, 2024-01-05 a Friday.
        for (title, date) in [("Práctica", "2024-01-01"), ("Milonga", "2024-01-05")] {
            create(
                &app,
                json!({ "title": title, "event_type": "milonga", "date": date, "has_weekly_recurrence": true }),
            )
            .await;
        }
        create(
            &app,
            json!({ "title": "Suelta", "event_type": "milonga", "date": "2024-01-02" }),
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/admin/events/recurring-by-weekday", None).await;

        assert_eq!(status, StatusCode::OK);
        let groups = json.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        let labels: Vec<&str> = groups.iter().map(|g| g["label"].as_str().unwrap()).collect();
        assert!(labels.contains(&"Lunes"));
        assert!(labels.contains(&"Viernes"));
    }
}
