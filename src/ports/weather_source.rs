//! WeatherSource port - Interface for current conditions at a location.

use async_trait::async_trait;

use crate::domain::foundation::Coordinates;
use crate::domain::personalization::WeatherMetrics;

use super::SourceError;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current weather, or `None` when the provider has nothing for the spot.
    async fn fetch_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<WeatherMetrics>, SourceError>;
}
