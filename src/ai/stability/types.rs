//! Stability v1 text-to-image payloads.

use serde::{Deserialize, Serialize};

/// Classifier-free guidance scale sent with every request.
pub const CFG_SCALE: u32 = 7;

/// Diffusion steps sent with every request.
pub const STEPS: u32 = 30;

/// Request body for `/v1/generation/{engine}/text-to-image`.
#[derive(Debug, Serialize)]
pub struct TextToImageRequest {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: u32,
    pub samples: u32,
    pub steps: u32,
}

impl TextToImageRequest {
    pub fn new(prompt: &str, samples: u32) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: prompt.to_string(),
                weight: None,
            }],
            cfg_scale: CFG_SCALE,
            samples,
            steps: STEPS,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextPrompt {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

/// Top-level text-to-image response.
#[derive(Debug, Deserialize)]
pub struct TextToImageResponse {
    pub artifacts: Vec<Artifact>,
}

/// One generated image.
#[derive(Debug, Deserialize)]
pub struct Artifact {
    pub base64: String,
    #[serde(default)]
    pub seed: Option<u64>,
    /// `SUCCESS`, `CONTENT_FILTERED` or `ERROR`.
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}
