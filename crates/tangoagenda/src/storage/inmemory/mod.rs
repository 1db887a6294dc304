//! In-memory storage backend.
//!
//! Stores events and teachers in HashMaps wrapped in `Arc<RwLock<_>>`. Used by
//! default and by tests; nothing is persisted.

mod repository;

pub use repository::InMemoryRepository;
