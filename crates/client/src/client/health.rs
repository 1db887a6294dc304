//! Health check operations.

use serde::{Deserialize, Serialize};

use super::TangoAgendaClient;
use crate::error::{ClientError, Result};

/// Readiness report from `/healthz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TangoAgendaClient {
    /// Check that the process is up.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response).await
    }

    /// Check that the store answers queries.
    ///
    /// A 503 still carries a readiness report, so it is decoded rather than
    /// turned into an error.
    pub async fn healthz(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        match response.status().as_u16() {
            200 | 503 => response.json().await.map_err(ClientError::from),
            _ => self.handle_response(response).await,
        }
    }
}
