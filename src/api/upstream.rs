//! Downstream gateway for the Ollama server.
//!
//! Exactly one outbound HTTP call per invocation against the fixed local
//! base address: no retries, no circuit breaking, no timeout override
//! beyond the shared client's defaults. Every call and its outcome are
//! logged with the request correlation id attached.

use serde_json::Value;

use crate::core::error::{BridgeError, Result};

/// Gateway to the local Ollama server.
///
/// Holds the shared HTTP client and the upstream base URL; it carries no
/// per-request state.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `GET /api/tags` - list the locally installed models.
    pub async fn list_tags(&self, request_id: &str) -> Result<Value> {
        let url = format!("{}/api/tags", self.base_url);
        let request = self.client.get(&url);
        self.execute("GET", &url, request, request_id).await
    }

    /// `POST /api/chat` - non-streaming chat completion.
    pub async fn chat(&self, body: &Value, request_id: &str) -> Result<Value> {
        let url = format!("{}/api/chat", self.base_url);
        let request = self.client.post(&url).json(body);
        self.execute("POST", &url, request, request_id).await
    }

    /// `POST /api/generate` - non-streaming raw generation.
    pub async fn generate(&self, body: &Value, request_id: &str) -> Result<Value> {
        let url = format!("{}/api/generate", self.base_url);
        let request = self.client.post(&url).json(body);
        self.execute("POST", &url, request, request_id).await
    }

    /// Perform the call and parse the JSON body of a 2xx response.
    async fn execute(
        &self,
        method: &str,
        url: &str,
        request: reqwest::RequestBuilder,
        request_id: &str,
    ) -> Result<Value> {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            url = %url,
            "Upstream call"
        );

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                url = %url,
                error = %e,
                is_timeout = e.is_timeout(),
                is_connect = e.is_connect(),
                "Upstream request failed"
            );
            BridgeError::from(e)
        })?;

        let status = response.status();
        tracing::info!(
            request_id = %request_id,
            url = %url,
            status = %status,
            "Upstream call completed"
        );

        if !status.is_success() {
            tracing::error!(
                request_id = %request_id,
                url = %url,
                status = %status,
                "Upstream returned error status"
            );
            return Err(BridgeError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}
