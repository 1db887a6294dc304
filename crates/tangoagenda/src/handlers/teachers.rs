//! Teacher CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use tangoagenda_core::agenda::{
    validate_teacher, CreateTeacherRequest, Teacher, UpdateTeacherRequest,
};
use tangoagenda_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Teacher",
        id: id.to_string(),
    }
}

/// List teachers ordered by name (GET /api/admin/teachers).
pub async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, AppError> {
    Ok(Json(state.teacher_repo.list_teachers().await?))
}

/// Create a new teacher (POST /api/admin/teachers).
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = payload.into_teacher();
    validate_teacher(&teacher)?;

    state.teacher_repo.create_teacher(&teacher).await?;

    tracing::info!(teacher_id = %teacher.id, "Created teacher");

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Get a teacher (GET /api/admin/teachers/{id}).
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = state.teacher_repo.get_teacher(&id).await?;
    Ok(Json(teacher.ok_or_else(|| not_found(&id))?))
}

/// Update a teacher (PUT /api/admin/teachers/{id}).
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    let mut teacher = state
        .teacher_repo
        .get_teacher(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    payload.apply_to(&mut teacher);
    validate_teacher(&teacher)?;
    state.teacher_repo.update_teacher(&teacher).await?;

    tracing::info!(teacher_id = %id, "Updated teacher");

    Ok(Json(teacher))
}

/// Delete a teacher (DELETE /api/admin/teachers/{id}).
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.teacher_repo.delete_teacher(&id).await?;

    tracing::info!(teacher_id = %id, "Deleted teacher");

    Ok(StatusCode::NO_CONTENT)
}
