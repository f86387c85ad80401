use crate::{
    config::OpenAiConfig,
    error::{LogoError, Result},
    models::{
        GeneratedImage, GenerationParams, ImageReference, OpenAiErrorResponse, OpenAiImageRequest,
        OpenAiImageResponse,
    },
    synthesis::traits::ImageService,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};

const POLICY_VIOLATION_CODE: &str = "content_policy_violation";
const RATE_LIMIT_CODES: [&str; 2] = ["rate_limit_exceeded", "insufficient_quota"];

/// Single-image client for an OpenAI-compatible `images/generations` endpoint.
#[derive(Clone)]
pub struct OpenAiImageClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(client: Client, config: &OpenAiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        Ok(Self {
            client,
            endpoint: config.generations_url(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| LogoError::ConfigError("API key contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ImageService for OpenAiImageClient {
    async fn generate_image(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GeneratedImage> {
        let payload = OpenAiImageRequest {
            model: &params.model,
            prompt,
            n: 1,
            size: &params.size,
            quality: &params.quality,
            response_format: "url",
        };

        log::debug!(
            "Requesting image from {} (model: {}, size: {}, quality: {})",
            self.endpoint,
            params.model,
            params.size,
            params.quality
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers()?)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LogoError::RequestError(format!("Image generation request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LogoError::RequestError(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let err = classify_api_error(status.as_u16(), &body);
            log::error!("Image generation rejected ({}): {}", status, err);
            return Err(err);
        }

        parse_image_response(&body)
    }
}

/// Extracts the single image reference from a successful response body.
pub fn parse_image_response(body: &str) -> Result<GeneratedImage> {
    let parsed: OpenAiImageResponse = serde_json::from_str(body)
        .map_err(|e| LogoError::ResponseError(format!("Unexpected response body: {}", e)))?;

    let image = parsed
        .data
        .into_iter()
        .next()
        .ok_or_else(|| LogoError::ResponseError("No images generated".into()))?;

    let url = image
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| LogoError::ResponseError("Generated image has no url".into()))?;

    Ok(GeneratedImage {
        reference: ImageReference::new(url),
        revised_prompt: image.revised_prompt,
    })
}

/// Maps a non-2xx response onto the synthesis failure taxonomy.
pub fn classify_api_error(status: u16, body: &str) -> LogoError {
    let parsed = serde_json::from_str::<OpenAiErrorResponse>(body).ok();

    let message = match &parsed {
        Some(parsed) => parsed.error.message.clone(),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("HTTP {}", status),
    };

    let code = parsed.as_ref().and_then(|p| p.error.code.as_deref());
    let error_type = parsed.as_ref().and_then(|p| p.error.error_type.as_deref());

    if code == Some(POLICY_VIOLATION_CODE) || error_type == Some(POLICY_VIOLATION_CODE) {
        return LogoError::PolicyViolation(message);
    }

    if status == 429 || code.map_or(false, |c| RATE_LIMIT_CODES.contains(&c)) {
        return LogoError::RateLimited(message);
    }

    LogoError::ApiError { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_violation_is_classified() {
        let body = r#"{"error":{"code":"content_policy_violation","message":"Your request was rejected as a result of our safety system.","type":"invalid_request_error"}}"#;
        match classify_api_error(400, body) {
            LogoError::PolicyViolation(message) => {
                assert!(message.contains("safety system"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_and_quota_are_classified() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        assert!(matches!(classify_api_error(429, body), LogoError::RateLimited(_)));

        let quota = r#"{"error":{"message":"You exceeded your quota","code":"insufficient_quota"}}"#;
        assert!(matches!(classify_api_error(403, quota), LogoError::RateLimited(_)));
    }

    #[test]
    fn test_unstructured_error_keeps_body() {
        match classify_api_error(502, "Bad Gateway") {
            LogoError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            classify_api_error(500, "").to_string(),
            "API error (500): HTTP 500"
        );
    }

    #[test]
    fn test_parse_image_response() {
        let body = r#"{"created":1700000000,"data":[{"url":"https://img.example/1.png","revised_prompt":"A clean logo"}]}"#;
        let image = parse_image_response(body).unwrap();
        assert_eq!(image.reference.as_str(), "https://img.example/1.png");
        assert_eq!(image.revised_prompt.as_deref(), Some("A clean logo"));
    }

    #[test]
    fn test_malformed_responses() {
        assert!(matches!(
            parse_image_response(r#"{"data":[]}"#),
            Err(LogoError::ResponseError(_))
        ));
        assert!(matches!(
            parse_image_response(r#"{"data":[{"b64_json":"AAAA"}]}"#),
            Err(LogoError::ResponseError(_))
        ));
        assert!(matches!(
            parse_image_response("<html>"),
            Err(LogoError::ResponseError(_))
        ));
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = OpenAiImageClient::new(Client::new(), &OpenAiConfig::new());
        assert!(matches!(result, Err(LogoError::ConfigError(_))));

        let client =
            OpenAiImageClient::new(Client::new(), &OpenAiConfig::new().with_api_key("sk-test"))
                .unwrap();
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/images/generations");
    }
}
