//! Context Classifier - qualitative vibe tags for personalization text.
//!
//! Vibes are derived from the same raw metrics as the scores but never
//! feed back into them.

use serde::{Deserialize, Serialize};

use super::decision_path::DecisionPath;
use super::metrics::UserMetrics;
use super::signal_scores::{SignalKind, SignalScores};
use super::vocabulary::{
    any_in, is_extreme_weather, CALM_NEWS, CHILL_PLACES, ENERGETIC_NEWS, MOUNTAIN_PLACES,
    OUTDOOR_PLACES, TENSE_NEWS, URBAN_PLACES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceVibe {
    Mountainous,
    OutdoorChill,
    Urban,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsVibe {
    Energetic,
    Tense,
    Calm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVibe {
    Extreme,
    Moody,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicVibe {
    HighEnergy,
    Chill,
    MidTempo,
}

/// Qualitative tags for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheContext {
    pub dominant_signal: SignalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_vibe: Option<PlaceVibe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_vibe: Option<NewsVibe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_vibe: Option<WeatherVibe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_vibe: Option<MusicVibe>,
}

/// Label recorded for the dominant signal, e.g. `dominant_signal:music`.
pub fn dominant_label(kind: SignalKind) -> String {
    format!("dominant_signal:{}", kind)
}

pub struct ContextClassifier;

impl ContextClassifier {
    /// Derives vibes and the dominant signal, noting the latter on `path`.
    pub fn classify(
        metrics: &UserMetrics,
        scores: &SignalScores,
        path: &mut DecisionPath,
    ) -> NicheContext {
        let dominant_signal = scores.dominant();
        path.push(dominant_label(dominant_signal));

        NicheContext {
            dominant_signal,
            place_vibe: Self::place_vibe(metrics),
            news_vibe: Self::news_vibe(metrics),
            weather_vibe: Self::weather_vibe(metrics),
            music_vibe: Self::music_vibe(metrics),
        }
    }

    fn place_vibe(metrics: &UserMetrics) -> Option<PlaceVibe> {
        let places = metrics.place_types();
        if any_in(&places, &MOUNTAIN_PLACES) {
            Some(PlaceVibe::Mountainous)
        } else if any_in(&places, &CHILL_PLACES) {
            Some(PlaceVibe::OutdoorChill)
        } else if any_in(&places, &URBAN_PLACES) {
            Some(PlaceVibe::Urban)
        } else if any_in(&places, &OUTDOOR_PLACES) {
            Some(PlaceVibe::Outdoor)
        } else {
            None
        }
    }

    /// Tense beats energetic beats calm.
    fn news_vibe(metrics: &UserMetrics) -> Option<NewsVibe> {
        let news = metrics.news.as_ref()?;
        let categories = news.active_categories();

        if any_in(&news.lowercase_themes(), &TENSE_NEWS) {
            Some(NewsVibe::Tense)
        } else if any_in(&categories, &ENERGETIC_NEWS) {
            Some(NewsVibe::Energetic)
        } else if any_in(&categories, &CALM_NEWS) {
            Some(NewsVibe::Calm)
        } else {
            None
        }
    }

    fn weather_vibe(metrics: &UserMetrics) -> Option<WeatherVibe> {
        let condition = metrics.weather_condition()?;
        if is_extreme_weather(&condition) {
            Some(WeatherVibe::Extreme)
        } else if condition.contains("rain") || condition.contains("snow") {
            Some(WeatherVibe::Moody)
        } else if condition.contains("clear") || condition.contains("sunny") {
            Some(WeatherVibe::Bright)
        } else {
            None
        }
    }

    fn music_vibe(metrics: &UserMetrics) -> Option<MusicVibe> {
        let tempo = metrics.leading_tempo()?;
        Some(if tempo > 120.0 {
            MusicVibe::HighEnergy
        } else if tempo < 80.0 {
            MusicVibe::Chill
        } else {
            MusicVibe::MidTempo
        })
    }
}
