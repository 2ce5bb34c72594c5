//! Error types for model calls

use thiserror::Error;

/// Result type for model calls
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while talking to a model
#[derive(Error, Debug)]
pub enum LLMError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit or exhausted quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "openai")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<LLMError> for crew_core::Error {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::ConfigurationError(msg) => crew_core::Error::Configuration(msg),
            other => crew_core::Error::GenerationFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core_error() {
        let err: crew_core::Error = LLMError::RateLimitExceeded("quota".into()).into();
        assert!(matches!(err, crew_core::Error::GenerationFailure(msg) if msg.contains("quota")));

        let err: crew_core::Error = LLMError::ConfigurationError("no key".into()).into();
        assert!(matches!(err, crew_core::Error::Configuration(_)));
    }
}
