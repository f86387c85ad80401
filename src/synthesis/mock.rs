//! In-memory backends for exercising the generation flow without a network.

use crate::{
    error::{LogoError, Result},
    models::{GeneratedImage, GenerationParams, ImageReference},
    synthesis::traits::{ImageFetcher, ImageService},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Returns `https://images.test/concept-<n>.png` for the n-th call (1-based)
/// unless a failure was scheduled for that call.
#[derive(Default)]
pub struct MockImageService {
    calls: AtomicUsize,
    failures: Mutex<HashMap<usize, LogoError>>,
    prompts: Mutex<Vec<String>>,
}

impl MockImageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(self, call: usize, error: LogoError) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(call, error);
        }
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn reference_for(call: usize) -> ImageReference {
        ImageReference::new(format!("https://images.test/concept-{}.png", call))
    }
}

#[async_trait]
impl ImageService for MockImageService {
    async fn generate_image(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<GeneratedImage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let scheduled = self
            .failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.remove(&call));
        if let Some(error) = scheduled {
            return Err(error);
        }

        Ok(GeneratedImage {
            reference: Self::reference_for(call),
            revised_prompt: Some(format!("revised #{}", call)),
        })
    }
}

/// Serves `png:<url>` for every reference except the ones marked as failing.
#[derive(Default)]
pub struct MockImageFetcher {
    calls: AtomicUsize,
    failing: HashSet<ImageReference>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(mut self, reference: ImageReference) -> Self {
        self.failing.insert(reference);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(reference) {
            return Err(LogoError::FetchError(format!(
                "Image host returned 404 Not Found for {}",
                reference
            )));
        }
        Ok(format!("png:{}", reference).into_bytes())
    }
}
