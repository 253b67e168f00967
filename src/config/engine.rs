//! Decision engine configuration

use serde::Deserialize;

use crate::application::{EngineSettings, DEFAULT_HISTORY_LIMIT};

use super::error::ValidationError;

/// Decision engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Recent experiences the variety filter considers
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Fixed seed for the variety draw (reproducible runs)
    pub variety_seed: Option<u64>,
}

impl EngineConfig {
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            history_limit: self.history_limit,
            variety_seed: self.variety_seed,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 || self.history_limit > 50 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            variety_seed: None,
        }
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.settings().history_limit, EngineSettings::default().history_limit);
        assert!(config.variety_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_settings_carry_seed() {
        let config = EngineConfig {
            variety_seed: Some(42),
            ..Default::default()
        };
        assert_eq!(config.settings().variety_seed, Some(42));
    }

    #[test]
    fn test_history_limit_bounds() {
        let zero = EngineConfig {
            history_limit: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidHistoryLimit));

        let huge = EngineConfig {
            history_limit: 51,
            ..Default::default()
        };
        assert!(huge.validate().is_err());
    }
}
