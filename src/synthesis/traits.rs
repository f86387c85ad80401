use crate::{
    error::Result,
    models::{GeneratedImage, GenerationParams, ImageReference},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Accepts one text prompt and returns exactly one image reference.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate_image(&self, prompt: &str, params: &GenerationParams)
        -> Result<GeneratedImage>;
}

/// Retrieves the binary content behind an image reference.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: ImageService + ?Sized> ImageService for Arc<T> {
    async fn generate_image(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GeneratedImage> {
        (**self).generate_image(prompt, params).await
    }
}

#[async_trait]
impl<T: ImageFetcher + ?Sized> ImageFetcher for Arc<T> {
    async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>> {
        (**self).fetch(reference).await
    }
}
