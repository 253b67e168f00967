//! TerrainSource port - Interface for elevation and nearby places.

use async_trait::async_trait;

use crate::domain::foundation::Coordinates;

use super::SourceError;

#[async_trait]
pub trait TerrainSource: Send + Sync {
    /// Elevation in meters, or `None` when unknown.
    async fn fetch_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, SourceError>;

    /// Distinct place type tags near the coordinates, in first-seen order.
    async fn fetch_place_types(&self, coordinates: Coordinates)
        -> Result<Vec<String>, SourceError>;
}
