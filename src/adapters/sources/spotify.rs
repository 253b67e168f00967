//! Spotify playback source - what the user is listening to right now.
//!
//! Two calls: the player state, then audio features for the track's tempo.
//! A failed features lookup keeps the track but drops the tempo.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::personalization::SpotifyMetrics;
use crate::ports::{PlaybackSource, SourceError};

pub const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";

const SOURCE_NAME: &str = "spotify";

pub struct SpotifyPlaybackSource {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl SpotifyPlaybackSource {
    pub fn new(client: Client) -> Self {
        Self {
            base_url: SPOTIFY_API_BASE_URL.to_string(),
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

    async fn fetch_tempo(&self, token: &str, track_id: &str) -> Option<f64> {
        let response = self
            .client
            .get(format!("{}/audio-features/{}", self.base_url, track_id))
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "spotify audio features unavailable");
            return None;
        }
        response
            .json::<AudioFeatures>()
            .await
            .ok()
            .and_then(|f| f.tempo)
            .filter(|t| t.is_finite() && *t > 0.0)
    }

    fn to_metrics(player: PlayerState, tempo: Option<f64>) -> SpotifyMetrics {
        let item = player.item;
        SpotifyMetrics {
            is_playing: player.is_playing,
            tempo,
            track_name: item.as_ref().and_then(|i| i.name.clone()),
            artist_name: item
                .as_ref()
                .and_then(|i| i.artists.first())
                .and_then(|a| a.name.clone()),
        }
    }
}

#[async_trait]
impl PlaybackSource for SpotifyPlaybackSource {
    async fn fetch_playback(
        &self,
        access_token: &SecretString,
    ) -> Result<Option<SpotifyMetrics>, SourceError> {
        let token = access_token.expose_secret();
        let response = self
            .client
            .get(format!("{}/me/player", self.base_url))
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await?;

        match response.status() {
            // No active device.
            StatusCode::NO_CONTENT => return Ok(None),
            StatusCode::UNAUTHORIZED => return Err(SourceError::unauthorized(SOURCE_NAME)),
            status if !status.is_success() => {
                return Err(SourceError::unavailable(SOURCE_NAME, format!("HTTP {}", status)));
            }
            _ => {}
        }

        let player: PlayerState = response.json().await?;
        let tempo = match player.item.as_ref().and_then(|i| i.id.as_deref()) {
            Some(track_id) => self.fetch_tempo(token, track_id).await,
            None => None,
        };
        Ok(Some(Self::to_metrics(player, tempo)))
    }
}

#[derive(Debug, Deserialize)]
struct PlayerState {
    is_playing: Option<bool>,
    item: Option<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AudioFeatures {
    tempo: Option<f64>,
}
