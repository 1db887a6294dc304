use std::{env, time::Duration};

use anyhow::Context;
use tangoagenda_core::agenda::PinConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "tangoagenda.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Agenda ordering overrides.
    pub pins: PinConfig,
    /// Page size used by the admin listing when `limit` is absent but
    /// `offset` is given (default: 5)
    pub default_admin_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "tangoagenda.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `PINNED_EVENTS` - `id:priority,...`
    /// - `WEEKDAY_PINNED_EVENTS` - `id@weekday:priority,...`
    /// - `DEFAULT_ADMIN_PAGE_SIZE` - Admin page size (default: 5)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let primary = lookup("PINNED_EVENTS").unwrap_or_default();
        let weekday = lookup("WEEKDAY_PINNED_EVENTS").unwrap_or_default();
        let pins = PinConfig::parse(&primary, &weekday)
            .context("Invalid PINNED_EVENTS or WEEKDAY_PINNED_EVENTS")?;

        Ok(Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "tangoagenda.db".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            pins,
            default_admin_page_size: lookup("DEFAULT_ADMIN_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(5),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sqlite_path: "tangoagenda.db".to_string(),
            request_timeout_seconds: 10,
            pins: PinConfig::default(),
            default_admin_page_size: 5,
        }
    }
}
