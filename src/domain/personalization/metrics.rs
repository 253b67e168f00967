//! UserMetrics - the ambient signals gathered for one personalization request.
//!
//! Every sub-record is optional. Absence is a neutral signal; nothing in the
//! engine treats a missing record as an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated signals for a single user at a single moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<LandscapeMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<SpotifyMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_playlist: Option<UploadedPlaylist>,
}

impl UserMetrics {
    /// Layers `overrides` on top of `self`; any record present in the
    /// override replaces the gathered one wholesale.
    pub fn merged_with(self, overrides: UserMetrics) -> UserMetrics {
        UserMetrics {
            landscape: overrides.landscape.or(self.landscape),
            news: overrides.news.or(self.news),
            weather: overrides.weather.or(self.weather),
            spotify: overrides.spotify.or(self.spotify),
            uploaded_playlist: overrides.uploaded_playlist.or(self.uploaded_playlist),
        }
    }

    /// Lowercased place type tags, empty when no landscape is known.
    pub fn place_types(&self) -> Vec<String> {
        self.landscape
            .as_ref()
            .and_then(|l| l.place_types.as_ref())
            .map(|types| types.iter().map(|t| t.to_lowercase()).collect())
            .unwrap_or_default()
    }

    pub fn elevation(&self) -> Option<f64> {
        self.landscape.as_ref().and_then(|l| l.elevation)
    }

    /// Lowercased weather condition, if weather is known.
    pub fn weather_condition(&self) -> Option<String> {
        self.weather.as_ref().map(|w| w.condition.to_lowercase())
    }

    /// Live playback tempo, if a track with known tempo is playing.
    pub fn live_tempo(&self) -> Option<f64> {
        self.spotify.as_ref().and_then(|s| s.tempo)
    }

    /// The uploaded playlist, only when it actually holds tracks.
    pub fn playlist(&self) -> Option<&UploadedPlaylist> {
        self.uploaded_playlist
            .as_ref()
            .filter(|p| !p.tracks.is_empty())
    }

    /// Live tempo, else the mean of the uploaded tracks that carry a tempo.
    pub fn average_tempo(&self) -> Option<f64> {
        self.live_tempo()
            .or_else(|| self.playlist().and_then(UploadedPlaylist::average_tempo))
    }

    /// Live tempo, else the first uploaded track's tempo.
    pub fn leading_tempo(&self) -> Option<f64> {
        self.live_tempo().or_else(|| {
            self.playlist()
                .and_then(|p| p.tracks.first())
                .and_then(|t| t.tempo)
        })
    }
}

/// Location-derived context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_types: Option<Vec<String>>,
}

/// Current headlines, grouped and summarized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsMetrics {
    #[serde(default)]
    pub headlines: Vec<String>,
    /// Category name to headlines in that category.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub dominant_themes: Vec<String>,
}

impl NewsMetrics {
    /// Lowercased names of categories that hold at least one headline.
    pub fn active_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|(_, headlines)| !headlines.is_empty())
            .map(|(name, _)| name.to_lowercase())
            .collect()
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.active_categories().iter().any(|c| c == name)
    }

    pub fn lowercase_themes(&self) -> Vec<String> {
        self.dominant_themes.iter().map(|t| t.to_lowercase()).collect()
    }
}

/// Current weather at the user's location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherMetrics {
    /// Temperature in degrees Celsius.
    pub temp: f64,
    /// Free-form condition label, e.g. "clear" or "heavy rain".
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

/// Live music playback state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
}

/// A user-supplied playlist, the offline alternative to live playback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedPlaylist {
    #[serde(default)]
    pub tracks: Vec<PlaylistTrack>,
}

impl UploadedPlaylist {
    pub fn average_tempo(&self) -> Option<f64> {
        let tempos: Vec<f64> = self.tracks.iter().filter_map(|t| t.tempo).collect();
        if tempos.is_empty() {
            return None;
        }
        Some(tempos.iter().sum::<f64>() / tempos.len() as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
}
