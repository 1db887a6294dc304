//! HTTP client for the tangoagenda API.

pub mod agenda;
pub mod events;
pub mod health;
pub mod teachers;

use crate::error::{ClientError, Result};

/// Default server address used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP client for the tangoagenda API.
#[derive(Debug, Clone)]
pub struct TangoAgendaClient {
    client: reqwest::Client,
    base_url: String,
}

impl TangoAgendaClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (TANGOAGENDA_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TANGOAGENDA_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a JSON body or turn the status into a [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle responses that carry no body (204).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ClientError::from_status(status, &body)
    }
}
