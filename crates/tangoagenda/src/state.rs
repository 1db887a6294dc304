//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The storage backend is picked at compile time.

use std::sync::Arc;

use tangoagenda_core::agenda::PinConfig;
use tangoagenda_core::storage::{EventRepository, TeacherRepository};

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub event_repo: Arc<dyn EventRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates an AppState from a single backend serving both repositories.
    pub fn with_repository<R>(repo: Arc<R>, config: Config) -> Self
    where
        R: EventRepository + TeacherRepository + 'static,
    {
        Self {
            event_repo: repo.clone(),
            teacher_repo: repo,
            config: Arc::new(config),
        }
    }

    /// Pin rules applied to every agenda query.
    pub fn pins(&self) -> &PinConfig {
        &self.config.pins
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            Ok(Self::with_repository(repo, config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Data is lost when the process exits.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            tracing::info!("Using in-memory storage");
            Ok(Self::with_repository(
                Arc::new(InMemoryRepository::new()),
                config,
            ))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage and default config.
        fn default() -> Self {
            Self::with_repository(Arc::new(InMemoryRepository::new()), Config::default())
        }
    }
}
