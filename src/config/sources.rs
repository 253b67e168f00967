//! Signal source configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::application::GatherSettings;
use crate::domain::foundation::Coordinates;

use super::error::ValidationError;

/// Signal source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// newsapi.org key; Google News RSS is used without it
    pub news_api_key: Option<Secret<String>>,

    /// Google Maps key for elevation and nearby places
    pub google_maps_api_key: Option<Secret<String>>,

    /// Latitude used when a request carries no location
    #[serde(default = "default_lat")]
    pub default_lat: f64,

    /// Longitude used when a request carries no location
    #[serde(default = "default_lng")]
    pub default_lng: f64,

    /// Per-source timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_news_api(&self) -> bool {
        has_key(&self.news_api_key)
    }

    pub fn has_google_maps(&self) -> bool {
        has_key(&self.google_maps_api_key)
    }

    pub fn default_coordinates(&self) -> Result<Coordinates, ValidationError> {
        Coordinates::try_new(self.default_lat, self.default_lng)
            .map_err(|_| ValidationError::InvalidCoordinates)
    }

    pub fn gather_settings(&self) -> Result<GatherSettings, ValidationError> {
        Ok(GatherSettings {
            source_timeout: self.timeout(),
            default_coordinates: self.default_coordinates()?,
        })
    }

    /// Validate source configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidSourceTimeout);
        }
        self.default_coordinates()?;
        Ok(())
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            google_maps_api_key: None,
            default_lat: default_lat(),
            default_lng: default_lng(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Present and not blank.
pub(super) fn has_key(key: &Option<Secret<String>>) -> bool {
    key.as_ref()
        .is_some_and(|k| !k.expose_secret().trim().is_empty())
}

fn default_lat() -> f64 {
    Coordinates::NEW_YORK.lat()
}

fn default_lng() -> f64 {
    Coordinates::NEW_YORK.lng()
}

fn default_timeout() -> u64 {
    8
}
