//! ParameterTuner - deterministic game parameters from metrics and engine output.
//!
//! Used when no language model is available, and as the baseline the
//! prompt describes to one when it is.

use crate::domain::personalization::{
    DecisionOutcome, MusicVibe, NewsVibe, PlaceVibe, SignalKind, UserMetrics, WeatherVibe,
};

use super::game_config::{GameParameters, Theme, DEFAULT_TERRAIN_HEIGHT, TERRAIN_SAMPLES};

const MIN_SCROLL: f64 = 3.0;
const MAX_SCROLL: f64 = 12.0;
const MIN_DENSITY: f64 = 0.2;
const MAX_DENSITY: f64 = 0.6;
const MIN_TERRAIN: f64 = 0.2;
const MAX_TERRAIN: f64 = 0.8;

/// Conditions that switch the palette to night.
const NIGHT_CONDITIONS: [&str; 5] = ["rain", "snow", "fog", "overcast", "storm"];

pub struct ParameterTuner;

impl ParameterTuner {
    pub fn tune(metrics: &UserMetrics, outcome: &DecisionOutcome) -> GameParameters {
        let context = &outcome.niche_context;
        let tense = context.news_vibe == Some(NewsVibe::Tense);
        let extreme = context.weather_vibe == Some(WeatherVibe::Extreme);

        GameParameters {
            scroll_speed: Self::scroll_speed(metrics),
            obstacle_density: Self::obstacle_density(tense, extreme),
            terrain_heights: Self::terrain_heights(metrics.elevation()),
            theme: Self::theme(metrics),
            difficulty: Self::difficulty(metrics, tense, extreme),
            flavor: Some(Self::flavor(outcome).to_string()),
            mood: Some(Self::mood(outcome)),
            narrative_hook: Some(Self::narrative_hook(metrics, outcome)),
        }
    }

    /// Tempo / 15 when music is known, otherwise the energy of the news mix.
    fn scroll_speed(metrics: &UserMetrics) -> f64 {
        if let Some(tempo) = metrics.average_tempo().filter(|t| t.is_finite()) {
            return (tempo / 15.0).clamp(MIN_SCROLL, MAX_SCROLL);
        }

        let news = metrics.news.as_ref();
        let has = |category: &str| news.is_some_and(|n| n.has_category(category));
        if has("sports") {
            10.0
        } else if has("politics") {
            8.0
        } else {
            6.0
        }
    }

    fn obstacle_density(tense: bool, extreme: bool) -> f64 {
        let mut density = 0.3;
        if tense {
            density += 0.15;
        }
        if extreme {
            density += 0.15;
        }
        f64::clamp(density, MIN_DENSITY, MAX_DENSITY)
    }

    /// Base height from elevation with a gentle, repeatable ripple.
    fn terrain_heights(elevation: Option<f64>) -> Vec<f64> {
        let Some(elevation) = elevation.filter(|e| e.is_finite() && *e > 0.0) else {
            return vec![DEFAULT_TERRAIN_HEIGHT; TERRAIN_SAMPLES];
        };

        let base = (elevation / 1000.0).clamp(MIN_TERRAIN, MAX_TERRAIN);
        (0..TERRAIN_SAMPLES)
            .map(|i| {
                let ripple = (i as f64 * 0.7).sin() * 0.1;
                let height = (base + ripple).clamp(MIN_TERRAIN, MAX_TERRAIN);
                (height * 100.0).round() / 100.0
            })
            .collect()
    }

    fn theme(metrics: &UserMetrics) -> Theme {
        match metrics.weather_condition() {
            Some(condition) if NIGHT_CONDITIONS.iter().any(|c| condition.contains(c)) => {
                Theme::Night
            }
            _ => Theme::Day,
        }
    }

    fn difficulty(metrics: &UserMetrics, tense: bool, extreme: bool) -> u8 {
        let mut difficulty: u8 = 5;
        if extreme {
            difficulty += 1;
        }
        if tense {
            difficulty += 1;
        }
        if let Some(weather) = &metrics.weather {
            if weather.temp > 32.0 || weather.temp < 0.0 {
                difficulty += 1;
            }
        }
        difficulty.clamp(1, 10)
    }

    fn flavor(outcome: &DecisionOutcome) -> &'static str {
        let context = &outcome.niche_context;
        if context.weather_vibe == Some(WeatherVibe::Extreme) {
            return "chaotic";
        }
        if context.news_vibe == Some(NewsVibe::Tense) {
            return "dystopian";
        }
        match context.music_vibe {
            Some(MusicVibe::HighEnergy) => "intense",
            Some(MusicVibe::Chill) => "chill",
            _ => match context.place_vibe {
                Some(PlaceVibe::OutdoorChill) => "chill",
                Some(PlaceVibe::Mountainous) => "epic",
                _ => "whimsical",
            },
        }
    }

    fn mood(outcome: &DecisionOutcome) -> String {
        let context = &outcome.niche_context;
        let mut parts = Vec::new();

        match context.news_vibe {
            Some(NewsVibe::Tense) => parts.push("news anxiety"),
            Some(NewsVibe::Energetic) => parts.push("headline hype"),
            Some(NewsVibe::Calm) => parts.push("easy news day"),
            None => {}
        }
        match context.weather_vibe {
            Some(WeatherVibe::Extreme) => parts.push("storm-brain"),
            Some(WeatherVibe::Moody) => parts.push("gloomy skies"),
            Some(WeatherVibe::Bright) => parts.push("sunny optimism"),
            None => {}
        }
        match context.music_vibe {
            Some(MusicVibe::HighEnergy) => parts.push("music energy"),
            Some(MusicVibe::Chill) => parts.push("lo-fi calm"),
            Some(MusicVibe::MidTempo) => parts.push("steady groove"),
            None => {}
        }

        if parts.is_empty() {
            "blank slate".to_string()
        } else {
            parts.join(" + ")
        }
    }

    fn narrative_hook(metrics: &UserMetrics, outcome: &DecisionOutcome) -> String {
        let track = metrics
            .spotify
            .as_ref()
            .and_then(|s| s.track_name.clone())
            .or_else(|| {
                metrics
                    .playlist()
                    .and_then(|p| p.tracks.first())
                    .and_then(|t| t.name.clone())
            });

        match outcome.niche_context.dominant_signal {
            SignalKind::Music => match track {
                Some(track) => format!("running to the beat of {}", track),
                None => "keeping time with your own heartbeat".to_string(),
            },
            SignalKind::Terrain => "racing across the hills outside your window".to_string(),
            SignalKind::News => match metrics.news.as_ref().and_then(|n| n.dominant_themes.first())
            {
                Some(theme) => format!("dodging the {} news cycle", theme.to_lowercase()),
                None => "dodging the news cycle".to_string(),
            },
            SignalKind::Image => "stepping inside the photo you just shared".to_string(),
            SignalKind::Weather => match metrics.weather_condition() {
                Some(condition) => format!("outrunning the {}", condition),
                None => "outrunning the forecast".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::personalization::{
        DecisionOptions, DecisionTree, FixedPicker, LandscapeMetrics, NewsMetrics,
        SpotifyMetrics, WeatherMetrics,
    };
    use std::collections::BTreeMap;

    fn tune(metrics: &UserMetrics) -> GameParameters {
        let outcome =
            DecisionTree::evaluate(metrics, &DecisionOptions::default(), &mut FixedPicker(0));
        ParameterTuner::tune(metrics, &outcome)
    }

    fn weather(condition: &str, temp: f64) -> Option<WeatherMetrics> {
        Some(WeatherMetrics {
            temp,
            condition: condition.to_string(),
            humidity: None,
        })
    }

    fn news(categories: &[&str], themes: &[&str]) -> Option<NewsMetrics> {
        let categories: BTreeMap<String, Vec<String>> = categories
            .iter()
            .map(|c| (c.to_string(), vec!["story".to_string()]))
            .collect();
        Some(NewsMetrics {
            headlines: vec!["story".to_string(); 5],
            categories,
            dominant_themes: themes.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn empty_metrics_tune_to_neutral_defaults() {
        let params = tune(&UserMetrics::default());

        assert_eq!(params.scroll_speed, 6.0);
        assert_eq!(params.obstacle_density, 0.3);
        assert_eq!(params.terrain_heights, vec![0.5; 15]);
        assert_eq!(params.theme, Theme::Day);
        assert_eq!(params.difficulty, 5);
        assert_eq!(params.mood.as_deref(), Some("blank slate"));
    }

    #[test]
    fn scroll_speed_follows_tempo() {
        let metrics = |tempo: f64| UserMetrics {
            spotify: Some(SpotifyMetrics {
                tempo: Some(tempo),
                track_name: Some("Levitating".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(tune(&metrics(150.0)).scroll_speed, 10.0);
        assert_eq!(tune(&metrics(300.0)).scroll_speed, 12.0);
        assert_eq!(tune(&metrics(30.0)).scroll_speed, 3.0);
        assert_eq!(
            tune(&metrics(120.0)).narrative_hook.as_deref(),
            Some("running to the beat of Levitating")
        );
    }

    #[test]
    fn scroll_speed_follows_news_energy_without_music() {
        let sports = UserMetrics {
            news: news(&["sports", "politics"], &[]),
            ..Default::default()
        };
        assert_eq!(tune(&sports).scroll_speed, 10.0);

        let politics = UserMetrics {
            news: news(&["politics"], &[]),
            ..Default::default()
        };
        assert_eq!(tune(&politics).scroll_speed, 8.0);

        let tech = UserMetrics {
            news: news(&["technology"], &[]),
            ..Default::default()
        };
        assert_eq!(tune(&tech).scroll_speed, 6.0);
    }

    #[test]
    fn storms_and_tense_news_raise_density_and_difficulty() {
        let metrics = UserMetrics {
            weather: weather("thunderstorm", 35.0),
            news: news(&[], &["war"]),
            ..Default::default()
        };
        let params = tune(&metrics);

        assert!((params.obstacle_density - 0.6).abs() < 1e-9);
        assert_eq!(params.difficulty, 8);
        assert_eq!(params.theme, Theme::Night);
        assert_eq!(params.flavor.as_deref(), Some("chaotic"));
    }

    #[test]
    fn cold_clear_day_adds_one_difficulty() {
        let metrics = UserMetrics {
            weather: weather("clear", -4.0),
            ..Default::default()
        };
        let params = tune(&metrics);

        assert_eq!(params.difficulty, 6);
        assert_eq!(params.theme, Theme::Day);
    }

    #[test]
    fn overcast_is_night() {
        let metrics = UserMetrics {
            weather: weather("Overcast", 15.0),
            ..Default::default()
        };
        assert_eq!(tune(&metrics).theme, Theme::Night);
    }

    #[test]
    fn terrain_heights_track_elevation_within_bounds() {
        let metrics = UserMetrics {
            landscape: Some(LandscapeMetrics {
                elevation: Some(650.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let heights = tune(&metrics).terrain_heights;

        assert_eq!(heights.len(), TERRAIN_SAMPLES);
        assert!(heights.iter().all(|h| (MIN_TERRAIN..=MAX_TERRAIN).contains(h)));
        assert_eq!(heights[0], 0.65);
        assert!(heights.iter().any(|h| *h != heights[0]));
    }

    #[test]
    fn tuning_is_deterministic() {
        let metrics = UserMetrics {
            weather: weather("rain", 12.0),
            news: news(&["sports"], &["finals"]),
            ..Default::default()
        };
        assert_eq!(tune(&metrics), tune(&metrics));
    }
}
