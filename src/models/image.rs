use crate::config::OpenAiConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque locator returned by the synthesis service, not the image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed synthesis parameters shared by every request of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub model: String,
    pub size: String,
    pub quality: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&OpenAiConfig::default())
    }
}

impl From<&OpenAiConfig> for GenerationParams {
    fn from(config: &OpenAiConfig) -> Self {
        Self {
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
        }
    }
}

/// One successful single-image generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub reference: ImageReference,
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpenAiImageRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub n: u8,
    pub size: &'a str,
    pub quality: &'a str,
    pub response_format: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiImageResponse {
    #[serde(default)]
    pub created: Option<i64>,
    pub data: Vec<OpenAiImageData>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiErrorResponse {
    pub error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
