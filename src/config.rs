use crate::error::{LogoError, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "standard";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub size: String,
    pub quality: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub openai: OpenAiConfig,
    pub log_json: bool,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            quality: DEFAULT_IMAGE_QUALITY.to_string(),
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok();
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_IMAGE_MODEL")
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        OpenAiConfig {
            api_key,
            base_url,
            model,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Returns the credential, or the startup error that must halt the process.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(LogoError::ConfigError(
                "OpenAI API key not found. Set OPENAI_API_KEY in the environment or a .env file"
                    .into(),
            )),
        }
    }

    /// Endpoint for single-image generation requests.
    pub fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            openai: OpenAiConfig::default(),
            log_json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let log_json = env::var("LOG_JSON").ok().map_or(false, |val| val == "true");

        Config {
            port,
            openai: OpenAiConfig::from_env(),
            log_json,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = OpenAiConfig::new();
        assert!(matches!(
            config.require_api_key(),
            Err(LogoError::ConfigError(_))
        ));

        let blank = OpenAiConfig::new().with_api_key("   ");
        assert!(blank.require_api_key().is_err());

        let ok = OpenAiConfig::new().with_api_key("sk-test");
        assert_eq!(ok.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_defaults_match_concept_parameters() {
        let config = OpenAiConfig::default();
        assert_eq!(config.model, "dall-e-3");
        assert_eq!(config.size, "1024x1024");
        assert_eq!(config.quality, "standard");
        assert_eq!(Config::new().port_or_default(), 8080);
    }

    #[test]
    fn test_generations_url_trims_trailing_slash() {
        let config = OpenAiConfig::new().with_base_url("http://127.0.0.1:9000/v1/");
        assert_eq!(
            config.generations_url(),
            "http://127.0.0.1:9000/v1/images/generations"
        );
    }
}
