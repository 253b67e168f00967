//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that loaded but cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("server.host and server.port do not form a socket address")]
    InvalidAddress,

    #[error("server.port must be non-zero")]
    InvalidPort,

    #[error("server.request_timeout_secs must be between 1 and 300")]
    InvalidTimeout,

    #[error("sources.timeout_secs must be between 1 and 60")]
    InvalidSourceTimeout,

    #[error("sources.default_lat/default_lng are not valid coordinates")]
    InvalidCoordinates,

    #[error("engine.history_limit must be between 1 and 50")]
    InvalidHistoryLimit,

    #[error("ai.timeout_secs must be between 1 and 300")]
    InvalidAiTimeout,

    #[error("ai.max_retries must be at most 5")]
    InvalidAiRetries,

    #[error("ai.base_url must be an http(s) URL")]
    InvalidAiBaseUrl,

    #[error("database.url must be a postgres:// URL")]
    InvalidDatabaseUrl,

    #[error("database.min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("database.max_connections exceeds 100")]
    PoolSizeTooLarge,
}
