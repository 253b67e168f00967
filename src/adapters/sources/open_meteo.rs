//! Open-Meteo source - keyless current weather.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::Coordinates;
use crate::domain::personalization::WeatherMetrics;
use crate::domain::signals::weather_code_label;
use crate::ports::{SourceError, WeatherSource};

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

const SOURCE_NAME: &str = "open-meteo";
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code";

pub struct OpenMeteoSource {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OpenMeteoSource {
    pub fn new(client: Client) -> Self {
        Self {
            base_url: OPEN_METEO_BASE_URL.to_string(),
            timeout: Duration::from_secs(8),
            client,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn to_metrics(body: ForecastResponse) -> Option<WeatherMetrics> {
        let current = body.current?;
        let code = current.weather_code.unwrap_or(0);
        Some(WeatherMetrics {
            temp: current.temperature_2m.unwrap_or(0.0),
            condition: weather_code_label(code).to_string(),
            humidity: current.relative_humidity_2m,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn fetch_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<WeatherMetrics>, SourceError> {
        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("latitude", coordinates.lat().to_string()),
                ("longitude", coordinates.lng().to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
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

        let body: ForecastResponse = response.json().await?;
        Ok(Self::to_metrics(body))
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    weather_code: Option<u16>,
}
