//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RECESS` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working
//! demo setup (RSS news, offline generator, in-memory history).
//!
//! # Example
//!
//! ```no_run
//! use recess::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod engine;
mod error;
mod server;
mod sources;

pub use ai::{AiConfig, MAX_AI_RETRIES};
pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use sources::SourcesConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Decision engine configuration (history window, variety seed)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Signal source configuration (API keys, default location)
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Content generator configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Database configuration (optional PostgreSQL history)
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RECESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RECESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RECESS__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RECESS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.engine.validate()?;
        self.sources.validate()?;
        self.ai.validate()?;
        self.database.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "RECESS__SERVER__PORT",
        "RECESS__SERVER__ENVIRONMENT",
        "RECESS__ENGINE__HISTORY_LIMIT",
        "RECESS__SOURCES__NEWS_API_KEY",
        "RECESS__AI__GEMINI_API_KEY",
        "RECESS__DATABASE__URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
        assert!(!config.ai.has_gemini());
        assert!(config.database.url().is_none());
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engine.history_limit, 5);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RECESS__SERVER__PORT", "3000");
        env::set_var("RECESS__SERVER__ENVIRONMENT", "production");
        env::set_var("RECESS__ENGINE__HISTORY_LIMIT", "3");
        env::set_var("RECESS__SOURCES__NEWS_API_KEY", "news-key");
        env::set_var("RECESS__AI__GEMINI_API_KEY", "gemini-key");
        env::set_var("RECESS__DATABASE__URL", "postgresql://test@localhost/recess");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.engine.history_limit, 3);
        assert!(config.sources.has_news_api());
        assert_eq!(
            config.ai.gemini_api_key.as_ref().unwrap().expose_secret(),
            "gemini-key"
        );
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/recess"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_surfaces_section_errors() {
        let mut config = AppConfig::default();
        config.engine.history_limit = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidHistoryLimit));
    }
}
