use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        admin::{
            create_event, delete_event, get_event, list_events, list_recurring_by_weekday,
            toggle_event, update_event,
        },
        events::{get_agenda_event, list_agenda},
        health::{healthz, livez},
        teachers::{create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let admin_routes = Router::new()
        .route("/events", get(list_events).post(create_event))
        // Static segment, must not be taken as an event ID.
        .route("/events/recurring-by-weekday", get(list_recurring_by_weekday))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/toggle", patch(toggle_event))
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        );

    let api_routes = Router::new()
        .route("/events", get(list_agenda))
        .route("/events/{id}", get(get_agenda_event))
        .nest("/admin", admin_routes)
        .layer(cors);

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
