use crate::{
    error::{LogoError, Result},
    models::ImageReference,
    synthesis::traits::ImageFetcher,
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(reference.as_str())
            .send()
            .await
            .map_err(|e| LogoError::FetchError(format!("Could not reach image host: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogoError::FetchError(format!(
                "Image host returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LogoError::FetchError(format!("Failed to read image body: {}", e)))?;

        log::debug!("Fetched {} bytes from {}", bytes.len(), reference);
        Ok(bytes.to_vec())
    }
}
