use crate::models::{GenerationRequest, GenerationResponse};
use crate::{Error, Result};
use reqwest::Client;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:5000";

/// HTTP client for the gateway's generation endpoint.
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST one generation request and return the data URIs.
    ///
    /// The body is read as JSON whatever the status; an `error` field turns
    /// into [`Error::Gateway`] with that message.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let url = format!("{}/api/generate-image", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach gateway at {}: {}", url, e);
                e
            })?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: GenerationResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unreadable gateway response (status {}): {}", status, e);
            Error::Gateway(format!(
                "Unexpected response from gateway (status {})",
                status
            ))
        })?;

        if let Some(error) = parsed.error {
            return Err(Error::Gateway(error));
        }

        Ok(parsed.images.unwrap_or_default())
    }
}
