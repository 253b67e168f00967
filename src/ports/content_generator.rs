//! ContentGenerator port - Interface for turning a decision into a game bundle.
//!
//! Generators receive the full engine output and return a draft. Drafts are
//! always sanitized by the caller, so implementations may be sloppy about
//! ranges but must report transport and quota failures precisely.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::{DraftGameConfig, GenerationRequest};

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<DraftGameConfig, GenerationError>;

    /// Short name for logs, e.g. "gemini".
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Account quota exhausted.
    #[error("quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// API key missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider answered without any content.
    #[error("empty response from provider")]
    EmptyResponse,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl GenerationError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True for rate-limit and quota failures, which are served the
    /// default bundle instead of an error.
    pub fn is_quota(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. } | GenerationError::QuotaExceeded { .. }
        )
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_covers_rate_limits_and_exhaustion() {
        assert!(GenerationError::rate_limited(30).is_quota());
        assert!(GenerationError::quota_exceeded("daily limit").is_quota());
        assert!(!GenerationError::AuthenticationFailed.is_quota());
        assert!(!GenerationError::parse("bad json").is_quota());
        assert!(!GenerationError::EmptyResponse.is_quota());
    }

    #[test]
    fn retryable_errors() {
        assert!(GenerationError::network("reset").is_retryable());
        assert!(GenerationError::Timeout { timeout_secs: 20 }.is_retryable());
        assert!(!GenerationError::quota_exceeded("x").is_retryable());
        assert!(!GenerationError::AuthenticationFailed.is_retryable());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            GenerationError::rate_limited(12).to_string(),
            "rate limited: retry after 12s"
        );
        assert_eq!(
            GenerationError::EmptyResponse.to_string(),
            "empty response from provider"
        );
    }
}
