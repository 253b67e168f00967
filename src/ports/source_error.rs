//! SourceError - shared failure type for every signal source port.

use thiserror::Error;

/// Errors raised while fetching an external signal.
///
/// Sources fail softly: callers log these and treat the signal as absent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Upstream responded with a non-success status.
    #[error("{source_name} unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },

    /// Credentials were missing or rejected.
    #[error("{source_name} rejected credentials")]
    Unauthorized { source_name: &'static str },

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The source did not answer in time.
    #[error("timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SourceError {
    pub fn unavailable(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name,
            message: message.into(),
        }
    }

    pub fn unauthorized(source_name: &'static str) -> Self {
        Self::Unauthorized { source_name }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_source() {
        let err = SourceError::unavailable("open-meteo", "HTTP 503");
        assert_eq!(err.to_string(), "open-meteo unavailable: HTTP 503");

        let err = SourceError::unauthorized("spotify");
        assert_eq!(err.to_string(), "spotify rejected credentials");
    }

    #[test]
    fn timeout_reports_seconds() {
        assert_eq!(SourceError::timeout(8).to_string(), "timed out after 8s");
    }
}
