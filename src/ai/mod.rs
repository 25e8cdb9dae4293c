//! Image provider integration
//!
//! Wraps the Stability AI text-to-image API behind [`ImageGenerationService`]
//! so the gateway can be driven by a mock in tests.

pub mod mime;
pub mod mock;
pub mod stability;

pub use mock::MockImageGenerationClient;
pub use stability::StabilityImageClient;

use crate::Result;
use async_trait::async_trait;

/// One image returned by the provider, still base64-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub base64: String,
    pub seed: Option<u64>,
    pub finish_reason: Option<String>,
}

impl GeneratedImage {
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
            seed: None,
            finish_reason: None,
        }
    }

    /// Self-contained `data:` URI for browser display.
    pub fn to_data_uri(&self) -> String {
        mime::data_uri(&self.base64)
    }
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate `samples` images for `prompt`, in provider order.
    async fn generate_images(&self, prompt: &str, samples: u32) -> Result<Vec<GeneratedImage>>;
}
