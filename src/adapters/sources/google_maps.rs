//! Google Maps terrain source - elevation and nearby place types.
//!
//! Elevation falls back to the keyless OpenTopoData API when no Google key
//! is configured or Google has no answer. Place types need the key; without
//! it the list is empty.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::foundation::Coordinates;
use crate::ports::{SourceError, TerrainSource};

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const OPEN_TOPO_BASE_URL: &str = "https://api.opentopodata.org/v1";

const SOURCE_NAME: &str = "google-maps";
const NEARBY_RADIUS_METERS: u32 = 500;

pub struct GoogleMapsTerrainSource {
    api_key: Option<Secret<String>>,
    maps_base_url: String,
    open_topo_base_url: String,
    open_topo_dataset: String,
    timeout: Duration,
    client: Client,
}

impl GoogleMapsTerrainSource {
    pub fn new(api_key: Option<Secret<String>>, client: Client) -> Self {
        Self {
            api_key,
            maps_base_url: GOOGLE_MAPS_BASE_URL.to_string(),
            open_topo_base_url: OPEN_TOPO_BASE_URL.to_string(),
            open_topo_dataset: "mapzen".to_string(),
            timeout: Duration::from_secs(8),
            client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_urls(mut self, maps: impl Into<String>, open_topo: impl Into<String>) -> Self {
        self.maps_base_url = maps.into();
        self.open_topo_base_url = open_topo.into();
        self
    }

    async fn google_elevation(
        &self,
        key: &Secret<String>,
        coordinates: Coordinates,
    ) -> Result<Option<f64>, SourceError> {
        let response = self
            .client
            .get(format!("{}/elevation/json", self.maps_base_url))
            .query(&[
                ("locations", coordinates.to_string()),
                ("key", key.expose_secret().clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(
                SOURCE_NAME,
                format!("HTTP {}", response.status()),
            ));
        }
        let body: ElevationResponse = response.json().await?;
        Ok(body.first_elevation())
    }

    async fn open_topo_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, SourceError> {
        let response = self
            .client
            .get(format!(
                "{}/{}",
                self.open_topo_base_url, self.open_topo_dataset
            ))
            .query(&[("locations", coordinates.to_string())])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(
                "opentopodata",
                format!("HTTP {}", response.status()),
            ));
        }
        let body: ElevationResponse = response.json().await?;
        Ok(body.first_elevation())
    }

    /// Distinct types across all places, in first-seen order.
    fn collect_place_types(body: PlacesResponse) -> Vec<String> {
        let mut seen = HashSet::new();
        body.results
            .into_iter()
            .flat_map(|place| place.types)
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

#[async_trait]
impl TerrainSource for GoogleMapsTerrainSource {
    async fn fetch_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, SourceError> {
        if let Some(key) = &self.api_key {
            match self.google_elevation(key, coordinates).await {
                Ok(Some(elevation)) => return Ok(Some(elevation)),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(error = %err, "google elevation failed, trying opentopodata");
                }
            }
        }
        self.open_topo_elevation(coordinates).await
    }

    async fn fetch_place_types(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<String>, SourceError> {
        let Some(key) = &self.api_key else {
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(format!("{}/place/nearbysearch/json", self.maps_base_url))
            .query(&[
                ("location", coordinates.to_string()),
                ("radius", NEARBY_RADIUS_METERS.to_string()),
                ("key", key.expose_secret().clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(
                SOURCE_NAME,
                format!("HTTP {}", response.status()),
            ));
        }
        let body: PlacesResponse = response.json().await?;
        Ok(Self::collect_place_types(body))
    }
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: Option<f64>,
}

impl ElevationResponse {
    fn first_elevation(&self) -> Option<f64> {
        self.results
            .first()
            .and_then(|r| r.elevation)
            .filter(|e| e.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    types: Vec<String>,
}
