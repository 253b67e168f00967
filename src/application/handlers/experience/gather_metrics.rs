//! GatherMetricsHandler - collects ambient signals for one request.
//!
//! Every source is called concurrently under its own timeout. A source that
//! fails or times out is logged and simply contributes nothing; gathering
//! itself never fails.

use futures::future::join_all;
use secrecy::SecretString;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{Coordinates, Timestamp};
use crate::domain::personalization::{
    LandscapeMetrics, NewsMetrics, SpotifyMetrics, UserMetrics, WeatherMetrics,
};
use crate::domain::signals::{Headline, NewsDigest};
use crate::ports::{NewsSource, PlaybackSource, SourceError, TerrainSource, WeatherSource};

/// Command to gather signals.
#[derive(Debug, Clone, Default)]
pub struct GatherMetricsCommand {
    pub coordinates: Option<Coordinates>,
    pub playback_token: Option<SecretString>,
}

/// What was gathered and which sources contributed.
#[derive(Debug, Clone)]
pub struct GatheredMetrics {
    pub metrics: UserMetrics,
    /// e.g. `news:general`, `weather`, `terrain`, `spotify`.
    pub sources_ingested: Vec<String>,
    pub run_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct GatherSettings {
    pub source_timeout: Duration,
    pub default_coordinates: Coordinates,
}

impl Default for GatherSettings {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(8),
            default_coordinates: Coordinates::NEW_YORK,
        }
    }
}

pub struct GatherMetricsHandler {
    news: Arc<dyn NewsSource>,
    weather: Arc<dyn WeatherSource>,
    terrain: Arc<dyn TerrainSource>,
    playback: Option<Arc<dyn PlaybackSource>>,
    settings: GatherSettings,
}

impl GatherMetricsHandler {
    pub fn new(
        news: Arc<dyn NewsSource>,
        weather: Arc<dyn WeatherSource>,
        terrain: Arc<dyn TerrainSource>,
    ) -> Self {
        Self {
            news,
            weather,
            terrain,
            playback: None,
            settings: GatherSettings::default(),
        }
    }

    pub fn with_playback(mut self, playback: Arc<dyn PlaybackSource>) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn with_settings(mut self, settings: GatherSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn handle(&self, cmd: GatherMetricsCommand) -> GatheredMetrics {
        let coordinates = cmd
            .coordinates
            .unwrap_or(self.settings.default_coordinates);

        let (news, weather, landscape, spotify) = tokio::join!(
            self.gather_news(),
            self.gather_weather(coordinates),
            self.gather_landscape(coordinates),
            self.gather_playback(cmd.playback_token.as_ref()),
        );

        let mut sources_ingested = news.1;
        let mut metrics = UserMetrics {
            news: news.0,
            landscape: Some(landscape.0),
            ..Default::default()
        };
        if weather.is_some() {
            sources_ingested.push("weather".to_string());
        }
        metrics.weather = weather;
        if landscape.1 {
            sources_ingested.push("terrain".to_string());
        }
        if spotify.is_some() {
            sources_ingested.push("spotify".to_string());
        }
        metrics.spotify = spotify;

        tracing::debug!(sources = ?sources_ingested, "metrics gathered");

        GatheredMetrics {
            metrics,
            sources_ingested,
            run_at: Timestamp::now(),
        }
    }

    /// Runs `fetch` under the source timeout; failures become `None`.
    async fn soft<T>(
        &self,
        source: &str,
        fetch: impl Future<Output = Result<T, SourceError>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.settings.source_timeout, fetch).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                tracing::warn!(source, error = %err, "signal source failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    source,
                    timeout_secs = self.settings.source_timeout.as_secs(),
                    "signal source timed out"
                );
                None
            }
        }
    }

    async fn gather_news(&self) -> (Option<NewsMetrics>, Vec<String>) {
        let feeds = self.news.feeds();
        let fetches = feeds.iter().map(|feed| async move {
            let label = format!("news:{}", feed.category);
            let headlines = self
                .soft(&label, self.news.fetch_headlines(*feed))
                .await
                .unwrap_or_default();
            (feed.category.to_string(), headlines)
        });
        let batches: Vec<(String, Vec<Headline>)> = join_all(fetches)
            .await
            .into_iter()
            .filter(|(_, headlines)| !headlines.is_empty())
            .collect();

        if batches.is_empty() {
            return (None, Vec::new());
        }
        let ingested = batches
            .iter()
            .map(|(category, _)| format!("news:{}", category))
            .collect();
        (Some(NewsDigest::from_headlines(&batches)), ingested)
    }

    async fn gather_weather(&self, coordinates: Coordinates) -> Option<WeatherMetrics> {
        self.soft("weather", self.weather.fetch_weather(coordinates))
            .await
            .flatten()
    }

    /// Landscape always carries the coordinates; the flag reports whether
    /// any terrain data came back.
    async fn gather_landscape(&self, coordinates: Coordinates) -> (LandscapeMetrics, bool) {
        let (elevation, place_types) = tokio::join!(
            self.soft("elevation", self.terrain.fetch_elevation(coordinates)),
            self.soft("places", self.terrain.fetch_place_types(coordinates)),
        );
        let elevation = elevation.flatten();
        let place_types = place_types.filter(|types| !types.is_empty());
        let found = elevation.is_some() || place_types.is_some();

        (
            LandscapeMetrics {
                elevation,
                lat: Some(coordinates.lat()),
                lng: Some(coordinates.lng()),
                place_types,
            },
            found,
        )
    }

    async fn gather_playback(&self, token: Option<&SecretString>) -> Option<SpotifyMetrics> {
        let (Some(playback), Some(token)) = (&self.playback, token) else {
            return None;
        };
        self.soft("spotify", playback.fetch_playback(token))
            .await
            .flatten()
    }
}
