use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.stability.ai";

/// Bearer-authenticated JSON client for the Stability REST API.
pub struct StabilityHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StabilityHttpClient {
    /// Without a `timeout` the transport default applies.
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new_with_client(api_key, builder.build()?))
    }

    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// POST `request` to `path`. Non-success statuses become
    /// [`Error::Upstream`] carrying the response body verbatim.
    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Stability: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Stability API error (status {}): {}", status, error_text);
            if error_text.trim().is_empty() {
                return Err(Error::Upstream(format!(
                    "Stability API error (status {})",
                    status
                )));
            }
            return Err(Error::Upstream(error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Stability response: {}", e);
            Error::Upstream(format!("Failed to parse Stability response: {}", e))
        })
    }
}
