use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The synthesis service refused the prompt on content-policy grounds.
    #[error("Content policy violation: {0}")]
    PolicyViolation(String),

    /// Rate limit or quota exhaustion reported by the synthesis service.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Transport-level failure (connection, TLS, DNS).
    #[error("Request error: {0}")]
    RequestError(String),

    /// The service answered but the body could not be understood.
    #[error("Response error: {0}")]
    ResponseError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LogoError {
    /// Short machine-friendly label, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            LogoError::ConfigError(_) => "config",
            LogoError::ValidationError(_) => "validation",
            LogoError::PolicyViolation(_) => "policy_violation",
            LogoError::RateLimited(_) => "rate_limited",
            LogoError::RequestError(_) => "transport",
            LogoError::ResponseError(_) => "malformed_response",
            LogoError::ApiError { .. } => "api",
            LogoError::FetchError(_) => "fetch",
            LogoError::SerializationError(_) => "serialization",
            LogoError::IoError(_) => "io",
            LogoError::InternalError(_) => "internal",
        }
    }
}

impl From<reqwest::Error> for LogoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LogoError::ResponseError(err.to_string())
        } else {
            LogoError::RequestError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LogoError {
    fn from(err: serde_json::Error) -> Self {
        LogoError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for LogoError {
    fn from(err: std::io::Error) -> Self {
        LogoError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_surface_cause() {
        let err = LogoError::PolicyViolation("prompt rejected by safety system".into());
        assert_eq!(
            err.to_string(),
            "Content policy violation: prompt rejected by safety system"
        );
        assert_eq!(err.kind(), "policy_violation");

        let err = LogoError::ApiError {
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        assert_eq!(err.to_string(), "API error (401): Incorrect API key provided");
    }
}
