//! Prompt-to-images relay
//!
//! Validates an incoming [`GenerationRequest`], resolves the sample count and
//! makes exactly one provider call per valid request. Holds no per-request
//! state, so a single instance is shared by every connection.

use crate::ai::{ImageGenerationService, StabilityImageClient};
use crate::models::{Config, GenerationRequest};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const PROMPT_REQUIRED: &str = "Prompt is required";

#[derive(Clone)]
pub struct Gateway {
    images: Arc<dyn ImageGenerationService>,
}

impl Gateway {
    pub fn new(images: Arc<dyn ImageGenerationService>) -> Self {
        Self { images }
    }

    /// Gateway backed by the Stability client described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = StabilityImageClient::from_config(config)?;
        info!("Image provider: Stability (engine: {})", client.engine());
        Ok(Self::new(Arc::new(client)))
    }

    /// Generate images and return them as data URIs in provider order.
    pub async fn generate(&self, request: GenerationRequest) -> Result<Vec<String>> {
        let prompt = request
            .prompt
            .as_deref()
            .filter(|prompt| !prompt.is_empty())
            .ok_or_else(|| Error::Validation(PROMPT_REQUIRED.to_string()))?;

        let samples = request.sample_count();
        if let Some(use_case) = &request.use_case {
            debug!("Use case: {}", use_case);
        }
        info!(
            "Generating {} image(s) for a {}-character prompt",
            samples,
            prompt.chars().count()
        );

        let images = self
            .images
            .generate_images(prompt, samples)
            .await
            .map_err(|e| {
                error!("Image generation failed: {}", e);
                e
            })?;

        info!("Provider returned {} image(s)", images.len());
        Ok(images.iter().map(|image| image.to_data_uri()).collect())
    }
}
