//! Error types for LLM provider interactions.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to an LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed (transport-level, including client timeouts).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// API key not found in the environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The provider returned something the client could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// General provider error (non-2xx with a body, service fault, ...).
    #[error("Provider error: {0}")]
    ProviderError(String),
}

impl LlmError {
    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::HttpError(_) | LlmError::Timeout(_) | LlmError::RateLimitExceeded(_)
        )
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_) | LlmError::ApiKeyNotFound(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::Timeout("60s".into()).is_retryable());
        assert!(LlmError::RateLimitExceeded("429".into()).is_retryable());
        assert!(!LlmError::AuthenticationError("401".into()).is_retryable());
        assert!(!LlmError::InvalidResponse("bad json".into()).is_retryable());
    }

    #[test]
    fn test_auth_classification() {
        assert!(LlmError::ApiKeyNotFound("GROQ_API_KEY".into()).is_auth_error());
        assert!(!LlmError::Timeout("60s".into()).is_auth_error());
    }
}
