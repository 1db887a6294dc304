//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `tangoagenda_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMaps behind a `tokio::sync::RwLock`
//! - `sqlite`: SQLite storage using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always compiled so tests can use it.
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p tangoagenda --no-default-features --features sqlite
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg_attr(not(feature = "inmemory"), allow(unused_imports))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
