use super::client::StabilityHttpClient;
use super::types::{TextToImageRequest, TextToImageResponse};
use crate::ai::{GeneratedImage, ImageGenerationService};
use crate::models::Config;
use crate::Result;
use async_trait::async_trait;

/// Text-to-image client bound to one Stability engine.
pub struct StabilityImageClient {
    http: StabilityHttpClient,
    engine: String,
}

impl StabilityImageClient {
    pub fn new(http: StabilityHttpClient, engine: String) -> Self {
        Self { http, engine }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = StabilityHttpClient::new(
            config.stability_api_key.clone(),
            config.upstream_timeout,
        )?
        .with_base_url(config.stability_api_base.clone());

        Ok(Self::new(http, config.stability_engine.clone()))
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    fn text_to_image_path(&self) -> String {
        format!("/v1/generation/{}/text-to-image", self.engine)
    }
}

#[async_trait]
impl ImageGenerationService for StabilityImageClient {
    async fn generate_images(&self, prompt: &str, samples: u32) -> Result<Vec<GeneratedImage>> {
        tracing::debug!(
            "Requesting {} sample(s) from Stability engine {}",
            samples,
            self.engine
        );

        let request = TextToImageRequest::new(prompt, samples);
        let response: TextToImageResponse =
            self.http.post(&self.text_to_image_path(), &request).await?;

        for (idx, artifact) in response.artifacts.iter().enumerate() {
            if let Some(reason) = artifact
                .finish_reason
                .as_deref()
                .filter(|reason| *reason != "SUCCESS")
            {
                tracing::warn!("Stability artifact {} finished with {}", idx, reason);
            }
        }

        Ok(response
            .artifacts
            .into_iter()
            .map(|artifact| GeneratedImage {
                base64: artifact.base64,
                seed: artifact.seed,
                finish_reason: artifact.finish_reason,
            })
            .collect())
    }
}
