//! Decision Engine - ordered rule evaluation over normalized signals.
//!
//! # Rule order
//!
//! 1. Camera override (explicit request, skips scoring and variety)
//! 2. Priority weather (extreme conditions)
//! 3. Priority tense news
//! 4. Music dominant
//! 5. Terrain dominant
//! 6. Image dominant
//! 7. News dominant
//! 8. Situational (murky weather + image)
//! 9. Security leaf: always obstacle dodge
//!
//! The first matching rule wins. Every rule writes its label(s) to the
//! decision path before returning, and every selection except the camera
//! override is passed through the [`VarietyFilter`].

use serde::{Deserialize, Serialize};

use super::decision_path::DecisionPath;
use super::experience_type::ExperienceType;
use super::metrics::UserMetrics;
use super::niche_context::{ContextClassifier, NicheContext};
use super::signal_scores::{SignalNormalizer, SignalScores};
use super::variety::{VarietyFilter, VarietyPicker};
use super::vocabulary::{
    any_in, is_extreme_weather, CALM_NEWS, MOUNTAIN_PLACES, OUTDOOR_PLACES, TENSE_NEWS,
};

/// Path labels written by the rules.
pub mod labels {
    pub const CAMERA_OVERRIDE: &str = "priority_camera:face_dodge";

    pub const PRIORITY_WEATHER: &str = "priority_weather:extreme";

    pub const PRIORITY_TENSE_NEWS: &str = "priority_news:tense";
    pub const TENSE_REACTION: &str = "tense_news:reaction_biased";
    pub const TENSE_DODGE: &str = "tense_news:dodge_biased";

    pub const MUSIC_DOMINANT: &str = "music_dominant";
    pub const MUSIC_TEMPO_FAST: &str = "music:tempo_fast";
    pub const MUSIC_TEMPO_SLOW: &str = "music:tempo_slow";
    pub const MUSIC_TEMPO_MID: &str = "music:tempo_mid";
    pub const MUSIC_NO_TEMPO: &str = "music:no_tempo";

    pub const TERRAIN_DOMINANT: &str = "terrain_dominant";
    pub const TERRAIN_ELEVATION_HIGH: &str = "terrain:elevation_high";
    pub const TERRAIN_HILLY_OUTDOOR: &str = "terrain:hilly_or_outdoor";
    pub const TERRAIN_URBAN_FLAT: &str = "terrain:urban_flat";

    pub const IMAGE_DOMINANT: &str = "image_dominant";
    pub const IMAGE_CALM: &str = "image:calm_news";
    pub const IMAGE_DEFAULT: &str = "image:default_dodge";

    pub const NEWS_DOMINANT: &str = "news_dominant";
    pub const NEWS_TRIVIA_RICH: &str = "news:trivia_rich";
    pub const NEWS_SPORTS_WEATHER: &str = "news:sports_weather";
    pub const NEWS_TRIVIA_DEFAULT: &str = "news:trivia_default";

    pub const SITUATIONAL_MURKY_IMAGE: &str = "situational:murky_weather_image";

    pub const SECURITY_LEAF: &str = "security_leaf:fallback";
}

/// Caller-supplied switches for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOptions {
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub use_camera: bool,
    /// Types the user was recently assigned. Order is irrelevant.
    #[serde(default)]
    pub recent_types: Vec<ExperienceType>,
}

/// Everything the engine hands to the content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub suggested_type: ExperienceType,
    pub path: DecisionPath,
    pub signal_scores: SignalScores,
    pub niche_context: NicheContext,
}

/// Inputs shared by every rule.
pub struct RuleInput<'a> {
    pub metrics: &'a UserMetrics,
    pub scores: &'a SignalScores,
    pub has_image: bool,
}

/// A rule writes its labels and returns a selection, or leaves the path alone.
type Rule = fn(&RuleInput<'_>, &mut DecisionPath) -> Option<ExperienceType>;

const RULES: [Rule; 7] = [
    priority_weather,
    priority_tense_news,
    music_branch,
    terrain_branch,
    image_branch,
    news_branch,
    situational,
];

pub struct DecisionTree;

impl DecisionTree {
    /// Scores the metrics, classifies them and selects an experience.
    ///
    /// Total: every input, including empty metrics, yields a selection.
    pub fn evaluate(
        metrics: &UserMetrics,
        options: &DecisionOptions,
        picker: &mut dyn VarietyPicker,
    ) -> DecisionOutcome {
        let signal_scores = SignalNormalizer::compute(metrics, options.has_image);
        let mut path = DecisionPath::new();
        let niche_context = ContextClassifier::classify(metrics, &signal_scores, &mut path);

        if options.use_camera {
            path.push(labels::CAMERA_OVERRIDE);
            return DecisionOutcome {
                suggested_type: ExperienceType::FaceDodge,
                path,
                signal_scores,
                niche_context,
            };
        }

        let input = RuleInput {
            metrics,
            scores: &signal_scores,
            has_image: options.has_image,
        };
        let candidate = match RULES.iter().find_map(|rule| rule(&input, &mut path)) {
            Some(selected) => selected,
            None => security_leaf(&mut path),
        };

        let choice = VarietyFilter::apply(candidate, &options.recent_types, path, picker);
        DecisionOutcome {
            suggested_type: choice.experience_type,
            path: choice.path,
            signal_scores,
            niche_context,
        }
    }
}

fn priority_weather(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    let condition = input.metrics.weather_condition()?;
    if is_extreme_weather(&condition) || condition.contains("thunder") {
        path.push(labels::PRIORITY_WEATHER);
        return Some(ExperienceType::ObstacleDodge);
    }
    None
}

fn priority_tense_news(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    let news = input.metrics.news.as_ref()?;
    if !any_in(&news.lowercase_themes(), &TENSE_NEWS) || input.scores.news <= 0.5 {
        return None;
    }

    path.push(labels::PRIORITY_TENSE_NEWS);
    if input.scores.music > 0.5 {
        path.push(labels::TENSE_REACTION);
        Some(ExperienceType::ReactionTest)
    } else {
        path.push(labels::TENSE_DODGE);
        Some(ExperienceType::ObstacleDodge)
    }
}

fn music_branch(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    if input.scores.music < 0.5 {
        return None;
    }

    path.push(labels::MUSIC_DOMINANT);
    match input.metrics.average_tempo() {
        Some(tempo) if tempo > 120.0 => {
            path.push(labels::MUSIC_TEMPO_FAST);
            Some(ExperienceType::ReactionTest)
        }
        Some(tempo) if tempo < 80.0 => {
            path.push(labels::MUSIC_TEMPO_SLOW);
            Some(ExperienceType::RhythmTap)
        }
        Some(_) => {
            path.push(labels::MUSIC_TEMPO_MID);
            Some(ExperienceType::RhythmTap)
        }
        None => {
            path.push(labels::MUSIC_NO_TEMPO);
            Some(ExperienceType::RhythmTap)
        }
    }
}

fn terrain_branch(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    if input.scores.terrain < 0.5 {
        return None;
    }

    path.push(labels::TERRAIN_DOMINANT);
    let elevation = input.metrics.elevation().unwrap_or(0.0);
    let places = input.metrics.place_types();

    if elevation > 500.0 || any_in(&places, &MOUNTAIN_PLACES) {
        path.push(labels::TERRAIN_ELEVATION_HIGH);
        Some(ExperienceType::EndlessRunner)
    } else if elevation > 100.0 || any_in(&places, &OUTDOOR_PLACES) {
        path.push(labels::TERRAIN_HILLY_OUTDOOR);
        Some(ExperienceType::EndlessRunner)
    } else {
        path.push(labels::TERRAIN_URBAN_FLAT);
        Some(ExperienceType::ObstacleDodge)
    }
}

fn image_branch(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    if input.scores.image < 0.5 {
        return None;
    }

    path.push(labels::IMAGE_DOMINANT);
    let calm = input.metrics.news.as_ref().is_some_and(|news| {
        any_in(&news.active_categories(), &CALM_NEWS)
            || any_in(&news.lowercase_themes(), &CALM_NEWS)
    });

    if calm {
        path.push(labels::IMAGE_CALM);
        Some(ExperienceType::MemoryMatch)
    } else {
        path.push(labels::IMAGE_DEFAULT);
        Some(ExperienceType::ObstacleDodge)
    }
}

fn news_branch(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    if input.scores.news < 0.4 {
        return None;
    }
    let news = input.metrics.news.as_ref()?;

    path.push(labels::NEWS_DOMINANT);
    let has_tech = news.has_category("technology");
    let has_sports = news.has_category("sports");
    let has_entertainment = news.has_category("entertainment");

    if news.headlines.len() >= 4 && (has_tech || has_sports || !has_entertainment) {
        path.push(labels::NEWS_TRIVIA_RICH);
        Some(ExperienceType::Trivia)
    } else if has_sports && input.scores.weather > 0.3 {
        path.push(labels::NEWS_SPORTS_WEATHER);
        Some(ExperienceType::ObstacleDodge)
    } else {
        path.push(labels::NEWS_TRIVIA_DEFAULT);
        Some(ExperienceType::Trivia)
    }
}

/// Murky weather plus a photo favours matching pairs from that photo.
pub fn situational(input: &RuleInput<'_>, path: &mut DecisionPath) -> Option<ExperienceType> {
    let condition = input.metrics.weather_condition()?;
    let murky = condition.contains("fog") || condition.contains("overcast");
    if input.scores.weather >= 0.6 && murky && input.has_image {
        path.push(labels::SITUATIONAL_MURKY_IMAGE);
        return Some(ExperienceType::MemoryMatch);
    }
    None
}

fn security_leaf(path: &mut DecisionPath) -> ExperienceType {
    path.push(labels::SECURITY_LEAF);
    ExperienceType::ObstacleDodge
}
