pub mod fetch;
pub mod mock;
pub mod openai;
pub mod traits;

use crate::{
    config::OpenAiConfig,
    error::Result,
    generator::ConceptGenerator,
    models::GenerationParams,
    presenter::ResultPresenter,
    session::LogoSpark,
};
use reqwest::Client;

pub use fetch::HttpImageFetcher;
pub use openai::OpenAiImageClient;
pub use traits::{ImageFetcher, ImageService};

/// Live HTTP backends sharing one connection pool.
#[derive(Clone)]
pub struct SynthesisClient {
    image_client: OpenAiImageClient,
    fetcher: HttpImageFetcher,
    params: GenerationParams,
}

impl SynthesisClient {
    /// Fails with a configuration error when no API key is configured.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = Client::new();

        let image_client = OpenAiImageClient::new(client.clone(), config)?;
        log::info!(
            "Synthesis client ready (model: {}, endpoint: {})",
            config.model,
            image_client.endpoint()
        );

        Ok(Self {
            image_client,
            fetcher: HttpImageFetcher::new(client),
            params: GenerationParams::from(config),
        })
    }

    pub fn image(&self) -> &OpenAiImageClient {
        &self.image_client
    }

    pub fn fetcher(&self) -> &HttpImageFetcher {
        &self.fetcher
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn into_spark(self) -> LogoSpark<OpenAiImageClient, HttpImageFetcher> {
        LogoSpark::new(
            ConceptGenerator::new(self.image_client, self.params),
            ResultPresenter::new(self.fetcher),
        )
    }
}
