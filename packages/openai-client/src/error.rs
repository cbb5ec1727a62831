//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, DNS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the per-call timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, timeouts, rate limits (429) and server errors (5xx)
    /// are transient. Everything else will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            OpenAIError::Network(_) | OpenAIError::Timeout(_) => true,
            OpenAIError::Api { status, .. } => *status == 429 || *status >= 500,
            OpenAIError::Config(_) | OpenAIError::Parse(_) => false,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAIError::Timeout(err.to_string())
        } else {
            OpenAIError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(OpenAIError::Network("reset".into()).is_transient());
        assert!(OpenAIError::Timeout("15s".into()).is_transient());
        assert!(OpenAIError::Api { status: 429, message: String::new() }.is_transient());
        assert!(OpenAIError::Api { status: 503, message: String::new() }.is_transient());
        assert!(!OpenAIError::Api { status: 401, message: String::new() }.is_transient());
        assert!(!OpenAIError::Parse("bad json".into()).is_transient());
        assert!(!OpenAIError::Config("no key".into()).is_transient());
    }
}
