use super::{GeneratedImage, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory provider that records calls and replays canned images.
pub struct MockImageGenerationClient {
    images: Arc<Mutex<Vec<GeneratedImage>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return exactly these payloads, in order, regardless of sample count.
    pub fn with_image(self, base64: &str) -> Self {
        self.images.lock().unwrap().push(GeneratedImage::new(base64));
        self
    }

    /// Fail every call with an upstream error carrying `message`.
    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(prompt, samples)` for every call made so far.
    pub fn get_calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_images(&self, prompt: &str, samples: u32) -> Result<Vec<GeneratedImage>> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), samples));

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Upstream(message));
        }

        let images = self.images.lock().unwrap();
        if images.is_empty() {
            // 1x1 PNG header, one per requested sample
            Ok((0..samples)
                .map(|_| GeneratedImage::new("iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB"))
                .collect())
        } else {
            Ok(images.clone())
        }
    }
}
