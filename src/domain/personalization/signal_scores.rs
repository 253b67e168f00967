//! Signal Normalizer - reduces heterogeneous metrics to comparable [0, 1] scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics::UserMetrics;
use super::vocabulary::{any_in, is_extreme_weather, OUTDOOR_PLACES, URBAN_PLACES};

/// The five signal categories, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Music,
    Terrain,
    News,
    Image,
    Weather,
}

impl SignalKind {
    /// All signals in declaration order. Ties resolve to the earliest entry.
    pub fn all() -> &'static [SignalKind] {
        &[
            SignalKind::Music,
            SignalKind::Terrain,
            SignalKind::News,
            SignalKind::Image,
            SignalKind::Weather,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Music => "music",
            SignalKind::Terrain => "terrain",
            SignalKind::News => "news",
            SignalKind::Image => "image",
            SignalKind::Weather => "weather",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bounded score per signal. Computed once per request, never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    pub music: f64,
    pub terrain: f64,
    pub news: f64,
    pub image: f64,
    pub weather: f64,
}

impl SignalScores {
    pub fn get(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Music => self.music,
            SignalKind::Terrain => self.terrain,
            SignalKind::News => self.news,
            SignalKind::Image => self.image,
            SignalKind::Weather => self.weather,
        }
    }

    /// Scores paired with their signal, in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalKind, f64)> + '_ {
        SignalKind::all().iter().map(move |&k| (k, self.get(k)))
    }

    /// The highest-scoring signal; the first maximum wins on ties.
    pub fn dominant(&self) -> SignalKind {
        let mut best = SignalKind::Music;
        let mut best_score = f64::NEG_INFINITY;
        for (kind, score) in self.iter() {
            if score > best_score {
                best = kind;
                best_score = score;
            }
        }
        best
    }
}

const IMAGE_SCORE: f64 = 0.9;

/// Pure, total scoring of user metrics.
pub struct SignalNormalizer;

impl SignalNormalizer {
    /// Computes all five scores. Never fails; absent data scores 0.
    pub fn compute(metrics: &UserMetrics, has_image: bool) -> SignalScores {
        SignalScores {
            music: Self::music(metrics),
            terrain: Self::terrain(metrics),
            news: Self::news(metrics),
            image: if has_image { IMAGE_SCORE } else { 0.0 },
            weather: Self::weather(metrics),
        }
    }

    /// Live playback beats an uploaded playlist when both exist.
    fn music(metrics: &UserMetrics) -> f64 {
        if let Some(spotify) = metrics.spotify.as_ref().filter(|s| s.tempo.is_some()) {
            let mut score: f64 = 0.7;
            if spotify.track_name.is_some() {
                score += 0.2;
            }
            if spotify.artist_name.is_some() {
                score += 0.1;
            }
            return clamp_unit(score.min(1.0));
        }

        match metrics.playlist() {
            Some(playlist) => {
                let bonus = (playlist.tracks.len() as f64 * 0.05).min(0.3);
                clamp_unit(0.5 + bonus)
            }
            None => 0.0,
        }
    }

    fn terrain(metrics: &UserMetrics) -> f64 {
        let place_types = metrics.place_types();
        let mut score: f64 = 0.0;

        if let Some(elevation) = metrics.elevation().filter(|e| *e > 0.0) {
            score = 0.5 + (elevation / 2000.0).min(0.5);
        }
        if any_in(&place_types, &OUTDOOR_PLACES) {
            score = score.max(0.6);
        }
        if any_in(&place_types, &URBAN_PLACES) {
            score = score.max(0.3);
        }

        clamp_unit(score)
    }

    fn news(metrics: &UserMetrics) -> f64 {
        let Some(news) = metrics.news.as_ref() else {
            return 0.0;
        };

        let mut score: f64 = match news.headlines.len() {
            n if n >= 5 => 0.6,
            n if n >= 2 => 0.4,
            _ => 0.0,
        };
        if news.dominant_themes.len() >= 3 {
            score = score.max(0.5);
        }
        if news.active_categories().len() >= 2 {
            score = score.max(0.4);
        }

        clamp_unit(score)
    }

    fn weather(metrics: &UserMetrics) -> f64 {
        let Some(condition) = metrics.weather_condition() else {
            return 0.0;
        };

        let score = if is_extreme_weather(&condition) {
            0.9
        } else if condition.contains("rain") || condition.contains("snow") {
            0.7
        } else if condition.contains("clear") || condition.contains("sunny") {
            0.4
        } else {
            0.5
        };

        clamp_unit(score)
    }
}

/// Clamps into [0, 1]; non-finite input collapses to 0.
fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
