use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use tangoagenda_core::agenda::{
    CompositeIdError, DateParseError, EventError, ResolveError, TeacherError, WindowError,
};
use tangoagenda_core::storage::{
    repository_error_to_status_code, resolve_error_to_status_code, RepositoryError,
};

/// Request problems detected by the handlers themselves.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let err = &self.0;
        let code = if let Some(e) = err.downcast_ref::<ResolveError>() {
            resolve_error_to_status_code(e)
        } else if let Some(e) = err.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(e)
        } else if err.is::<RequestError>()
            || err.is::<EventError>()
            || err.is::<TeacherError>()
            || err.is::<DateParseError>()
            || err.is::<WindowError>()
            || err.is::<CompositeIdError>()
        {
            400
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self.0, "API error");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
