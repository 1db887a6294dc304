//! Pure functions for mapping core errors to HTTP status codes.

use crate::agenda::ResolveError;

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use tangoagenda_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Event",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`ResolveError`] to an HTTP status code.
///
/// An invalid window is the caller's fault (400). Store failures during the
/// resolution never expose a client error: anything the repository would map
/// below 500 is reported as 500, since the resolver issued the query itself.
pub fn resolve_error_to_status_code(error: &ResolveError) -> u16 {
    match error {
        ResolveError::InvalidWindow(_) => 400,
        ResolveError::UpstreamQuery(inner) => repository_error_to_status_code(inner).max(500),
    }
}
