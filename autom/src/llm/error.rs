//! Model API error types

use std::time::Duration;
use thiserror::Error;

/// Failures at the model boundary
///
/// None of these are retried; they end the run.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Model API rate limited the request (retry after {}s)", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Model API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Could not reach the model API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model API reply could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("Failed to encode request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No API key: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Unknown LLM provider '{0}' (expected openai or openai-chat)")]
    UnknownProvider(String),
}

impl LlmError {
    /// HTTP status the API answered with, when it answered at all
    pub fn http_status(&self) -> Option<u16> {
        match self {
            LlmError::RateLimited { .. } => Some(429),
            LlmError::ApiError { status, .. } => Some(*status),
            LlmError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// How long the API asked us to back off, for rate limits
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// True for problems with local setup rather than the remote call
    pub fn is_config_error(&self) -> bool {
        matches!(self, LlmError::MissingApiKey { .. } | LlmError::UnknownProvider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        let limited = LlmError::RateLimited {
            retry_after: Duration::from_secs(5),
        };
        assert_eq!(limited.http_status(), Some(429));

        let api = LlmError::ApiError {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        assert_eq!(api.http_status(), Some(401));
        assert_eq!(LlmError::InvalidResponse("truncated".to_string()).http_status(), None);
    }

    #[test]
    fn test_retry_after_only_for_rate_limits() {
        let err = LlmError::RateLimited {
            retry_after: Duration::from_secs(42),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(42)));
        assert!(err.to_string().contains("42s"));

        let err = LlmError::ApiError {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_config_errors() {
        let err = LlmError::MissingApiKey {
            env: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.is_config_error());
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        assert!(LlmError::UnknownProvider("anthropic".to_string()).is_config_error());
        assert!(!LlmError::InvalidResponse("x".to_string()).is_config_error());
    }
}
