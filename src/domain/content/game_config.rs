//! GameConfig - the playable bundle returned to the client.
//!
//! Generators produce a loosely-typed [`DraftGameConfig`]; [`GameConfig::sanitize`]
//! turns any draft into a config the client can always render.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::personalization::ExperienceType;

/// Number of terrain samples in a default bundle.
pub const TERRAIN_SAMPLES: usize = 15;

/// Longest terrain profile accepted from a generator.
pub const MAX_TERRAIN_SAMPLES: usize = 20;

pub const DEFAULT_SCROLL_SPEED: f64 = 6.0;
pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.3;
pub const DEFAULT_TERRAIN_HEIGHT: f64 = 0.5;
pub const DEFAULT_DIFFICULTY: u8 = 5;

const RATE_LIMITED_REASONING: &str =
    "The vibe machine is rate limited rn, so you get the classic. Try again in a minute.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable knobs shared by every experience type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameParameters {
    pub scroll_speed: f64,
    pub obstacle_density: f64,
    pub terrain_heights: Vec<f64>,
    pub theme: Theme,
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_hook: Option<String>,
}

impl Default for GameParameters {
    fn default() -> Self {
        Self {
            scroll_speed: DEFAULT_SCROLL_SPEED,
            obstacle_density: DEFAULT_OBSTACLE_DENSITY,
            terrain_heights: vec![DEFAULT_TERRAIN_HEIGHT; TERRAIN_SAMPLES],
            theme: Theme::Day,
            difficulty: DEFAULT_DIFFICULTY,
            flavor: None,
            mood: None,
            narrative_hook: None,
        }
    }
}

/// A validated, render-ready game bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub game_type: ExperienceType,
    pub reasoning: String,
    pub config: GameParameters,
}

/// Generator output before validation. Every field may be missing or wrong.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftGameConfig {
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub config: Option<DraftParameters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftParameters {
    #[serde(default)]
    pub scroll_speed: Option<f64>,
    #[serde(default)]
    pub obstacle_density: Option<f64>,
    #[serde(default)]
    pub terrain_heights: Option<Vec<f64>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub narrative_hook: Option<String>,
}

impl From<GameConfig> for DraftGameConfig {
    fn from(config: GameConfig) -> Self {
        let params = config.config;
        Self {
            game_type: Some(config.game_type.as_str().to_string()),
            reasoning: Some(config.reasoning),
            config: Some(DraftParameters {
                scroll_speed: Some(params.scroll_speed),
                obstacle_density: Some(params.obstacle_density),
                terrain_heights: Some(params.terrain_heights),
                theme: Some(params.theme.as_str().to_string()),
                difficulty: Some(f64::from(params.difficulty)),
                flavor: params.flavor,
                mood: params.mood,
                narrative_hook: params.narrative_hook,
            }),
        }
    }
}

impl GameConfig {
    /// The fixed bundle served when the generator is out of quota.
    pub fn default_bundle() -> Self {
        Self {
            game_type: ExperienceType::ObstacleDodge,
            reasoning: RATE_LIMITED_REASONING.to_string(),
            config: GameParameters::default(),
        }
    }

    /// Validates a generator draft against the engine's suggestion.
    ///
    /// Unknown game types fall back to `suggested`, and so does `face_dodge`
    /// unless the engine itself suggested it. Numbers are clamped into their
    /// documented ranges; missing or non-finite values take defaults.
    pub fn sanitize(draft: DraftGameConfig, suggested: ExperienceType) -> Self {
        let game_type = draft
            .game_type
            .as_deref()
            .and_then(|raw| raw.parse::<ExperienceType>().ok())
            .filter(|t| !t.requires_camera() || suggested.requires_camera())
            .unwrap_or(suggested);

        let reasoning = draft
            .reasoning
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| format!("Your signals pointed at {}, so here it is.", game_type));

        let params = draft.config.unwrap_or_default();
        let defaults = GameParameters::default();

        let terrain_heights: Vec<f64> = params
            .terrain_heights
            .unwrap_or_default()
            .into_iter()
            .filter(|h| h.is_finite())
            .map(|h| h.clamp(0.0, 1.0))
            .take(MAX_TERRAIN_SAMPLES)
            .collect();

        Self {
            game_type,
            reasoning,
            config: GameParameters {
                scroll_speed: finite_or(params.scroll_speed, defaults.scroll_speed)
                    .clamp(1.0, 15.0),
                obstacle_density: finite_or(params.obstacle_density, defaults.obstacle_density)
                    .clamp(0.0, 1.0),
                terrain_heights: if terrain_heights.is_empty() {
                    defaults.terrain_heights
                } else {
                    terrain_heights
                },
                theme: match params.theme.as_deref().map(str::trim) {
                    Some(t) if t.eq_ignore_ascii_case("night") => Theme::Night,
                    _ => Theme::Day,
                },
                difficulty: finite_or(params.difficulty, f64::from(defaults.difficulty))
                    .round()
                    .clamp(1.0, 10.0) as u8,
                flavor: non_blank(params.flavor),
                mood: non_blank(params.mood),
                narrative_hook: non_blank(params.narrative_hook),
            },
        }
    }
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_the_classic_dodge() {
        let bundle = GameConfig::default_bundle();

        assert_eq!(bundle.game_type, ExperienceType::ObstacleDodge);
        assert_eq!(bundle.config.scroll_speed, 6.0);
        assert_eq!(bundle.config.obstacle_density, 0.3);
        assert_eq!(bundle.config.terrain_heights, vec![0.5; 15]);
        assert_eq!(bundle.config.theme, Theme::Day);
        assert_eq!(bundle.config.difficulty, 5);
        assert!(!bundle.reasoning.is_empty());
    }

    #[test]
    fn empty_draft_sanitizes_to_defaults_with_suggested_type() {
        let config = GameConfig::sanitize(DraftGameConfig::default(), ExperienceType::Trivia);

        assert_eq!(config.game_type, ExperienceType::Trivia);
        assert_eq!(config.config, GameParameters::default());
        assert!(config.reasoning.contains("trivia"));
    }

    #[test]
    fn unknown_game_type_falls_back_to_suggestion() {
        let draft = DraftGameConfig {
            game_type: Some("real_world_task".to_string()),
            ..Default::default()
        };
        let config = GameConfig::sanitize(draft, ExperienceType::RhythmTap);
        assert_eq!(config.game_type, ExperienceType::RhythmTap);
    }

    #[test]
    fn generator_may_override_with_a_known_type() {
        let draft = DraftGameConfig {
            game_type: Some("Memory_Match".to_string()),
            ..Default::default()
        };
        let config = GameConfig::sanitize(draft, ExperienceType::Trivia);
        assert_eq!(config.game_type, ExperienceType::MemoryMatch);
    }

    #[test]
    fn face_dodge_requires_camera_suggestion() {
        let draft = DraftGameConfig {
            game_type: Some("face_dodge".to_string()),
            ..Default::default()
        };
        assert_eq!(
            GameConfig::sanitize(draft.clone(), ExperienceType::Trivia).game_type,
            ExperienceType::Trivia
        );
        assert_eq!(
            GameConfig::sanitize(draft, ExperienceType::FaceDodge).game_type,
            ExperienceType::FaceDodge
        );
    }

    #[test]
    fn numbers_are_clamped() {
        let draft = DraftGameConfig {
            config: Some(DraftParameters {
                scroll_speed: Some(40.0),
                obstacle_density: Some(-2.0),
                terrain_heights: Some(vec![1.5, -0.2, f64::NAN, 0.4]),
                difficulty: Some(0.2),
                theme: Some(" Night ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let params = GameConfig::sanitize(draft, ExperienceType::EndlessRunner).config;

        assert_eq!(params.scroll_speed, 15.0);
        assert_eq!(params.obstacle_density, 0.0);
        assert_eq!(params.terrain_heights, vec![1.0, 0.0, 0.4]);
        assert_eq!(params.difficulty, 1);
        assert_eq!(params.theme, Theme::Night);
    }

    #[test]
    fn non_finite_numbers_take_defaults() {
        let draft = DraftGameConfig {
            config: Some(DraftParameters {
                scroll_speed: Some(f64::INFINITY),
                difficulty: Some(f64::NAN),
                ..Default::default()
            }),
            ..Default::default()
        };
        let params = GameConfig::sanitize(draft, ExperienceType::Trivia).config;

        assert_eq!(params.scroll_speed, DEFAULT_SCROLL_SPEED);
        assert_eq!(params.difficulty, DEFAULT_DIFFICULTY);
    }

    #[test]
    fn long_terrain_profiles_are_truncated() {
        let draft = DraftGameConfig {
            config: Some(DraftParameters {
                terrain_heights: Some(vec![0.3; 40]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let params = GameConfig::sanitize(draft, ExperienceType::EndlessRunner).config;
        assert_eq!(params.terrain_heights.len(), MAX_TERRAIN_SAMPLES);
    }

    #[test]
    fn blank_creative_fields_are_dropped() {
        let draft = DraftGameConfig {
            reasoning: Some("  ".to_string()),
            config: Some(DraftParameters {
                flavor: Some("chaotic".to_string()),
                mood: Some("   ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = GameConfig::sanitize(draft, ExperienceType::ObstacleDodge);

        assert_eq!(config.config.flavor.as_deref(), Some("chaotic"));
        assert_eq!(config.config.mood, None);
        assert!(!config.reasoning.trim().is_empty());
    }

    #[test]
    fn sanitizing_a_valid_config_is_lossless() {
        let original = GameConfig {
            game_type: ExperienceType::RhythmTap,
            reasoning: "lowkey a banger".to_string(),
            config: GameParameters {
                scroll_speed: 8.5,
                theme: Theme::Night,
                difficulty: 7,
                narrative_hook: Some("tapping through the storm".to_string()),
                ..Default::default()
            },
        };
        let round = GameConfig::sanitize(original.clone().into(), ExperienceType::Trivia);
        assert_eq!(round, original);
    }

    #[test]
    fn draft_parses_generator_json() {
        let json = r#"{
            "gameType": "endless_runner",
            "reasoning": "touch grass bestie",
            "config": { "scrollSpeed": 9, "obstacleDensity": 0.45, "theme": "day", "extra": 1 }
        }"#;
        let draft: DraftGameConfig = serde_json::from_str(json).unwrap();
        let config = GameConfig::sanitize(draft, ExperienceType::Trivia);

        assert_eq!(config.game_type, ExperienceType::EndlessRunner);
        assert_eq!(config.config.scroll_speed, 9.0);
        assert_eq!(config.config.terrain_heights.len(), TERRAIN_SAMPLES);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(GameConfig::default_bundle()).unwrap();
        assert_eq!(json["gameType"], "obstacle_dodge");
        assert_eq!(json["config"]["scrollSpeed"], 6.0);
        assert_eq!(json["config"]["theme"], "day");
        assert!(json["config"].get("flavor").is_none());
    }
}
