//! PromptBuilder - briefs a language model on the engine's decision.
//!
//! The prompt carries the decision path, signal scores, vibes, variety
//! history and raw metrics, then the rules that map data onto parameters.
//! The response schema mirrors [`DraftGameConfig`](super::DraftGameConfig).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::Timestamp;
use crate::domain::personalization::{DecisionOutcome, ExperienceType, UserMetrics};

use super::tuner::ParameterTuner;

/// Everything a content generator needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub metrics: UserMetrics,
    pub outcome: DecisionOutcome,
    pub recent_types: Vec<ExperienceType>,
    pub has_image: bool,
    pub requested_at: Timestamp,
}

impl GenerationRequest {
    pub fn suggested_type(&self) -> ExperienceType {
        self.outcome.suggested_type
    }
}

const PERSONALIZATION_RULES: &str = r#"PERSONALIZATION RULES (follow strictly):
1. NEWS:
   - dominantThemes and headlines -> reasoning should reference these
   - Sports/energetic headlines -> higher scrollSpeed (8-12), day theme
   - Politics/tense -> obstacle_dodge, higher difficulty (6-8)
   - Entertainment -> lighter difficulty (3-5)
2. WEATHER:
   - Rain, snow, fog, overcast -> theme "night", slightly higher difficulty
   - Clear, sunny -> theme "day"
   - Temperature above 32C or below 0C -> difficulty +1
   - Thunderstorm -> obstacle_dodge with higher obstacleDensity
3. LANDSCAPE:
   - elevation above 500m -> endless_runner, terrainHeights from elevation
   - elevation 100-500m -> varied terrainHeights (hills)
   - mountain/hiking places -> endless_runner; restaurant/store -> obstacle_dodge
4. MUSIC:
   - tempo above 120 -> fast pace, scrollSpeed = tempo/15
   - tempo below 80 -> rhythm_tap with slow beats, scrollSpeed 3-5
   - uploaded playlist: use the average tempo; reference track names in reasoning
5. NUMERIC RANGES:
   - terrainHeights: 15 values, 0.2-0.8
   - scrollSpeed: 3-12. From news energy: sports=10, politics=8, tech=6
   - obstacleDensity: 0.2-0.6, higher for tense news or bad weather
   - difficulty: 1-10. Base 5, +1 extreme weather, +1 tense news
6. CREATIVE FIELDS:
   - flavor: one word (chaotic, chill, intense, whimsical, dystopian)
   - mood: emotional tone from headlines + weather + music combined
   - narrativeHook: one-line story from the data

reasoning: Gen-Z memeified, ironic, 1-2 sentences. Reference the user's data like a friend roasting their feed."#;

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(request: &GenerationRequest) -> String {
        let mut prompt = String::from(
            "You are a game designer creating a UNIQUE, PERSONALIZED mini-game. \
             Your config MUST directly reflect the user's data below. Never output a generic config.\n",
        );

        if request.has_image {
            prompt.push_str(
                "\nIMAGE: The user shared an image. Use its colors, mood and subject to personalize \
                 theme, difficulty and reasoning.\n",
            );
        }

        prompt.push_str(&Self::decision_note(&request.outcome));
        prompt.push_str(&Self::signal_note(&request.outcome));
        prompt.push_str(&Self::variety_note(&request.recent_types));

        prompt.push_str(&format!("\nContext: {}\n", request.requested_at.to_rfc3339()));

        prompt.push_str("\nAvailable game types:\n");
        for game_type in Self::offered_types(request.suggested_type()) {
            prompt.push_str(&format!("- {}: {}\n", game_type, game_type.brief()));
        }

        let baseline = ParameterTuner::tune(&request.metrics, &request.outcome);
        let baseline = serde_json::to_string(&baseline).unwrap_or_else(|_| "{}".to_string());
        prompt.push_str(&format!(
            "\nBASELINE CONFIG (derived from the data; refine, don't copy):\n{}\n",
            baseline
        ));

        let metrics = serde_json::to_string_pretty(&request.metrics)
            .unwrap_or_else(|_| "{}".to_string());
        prompt.push_str(&format!("\nUser data (USE THIS):\n{}\n\n", metrics));

        prompt.push_str(PERSONALIZATION_RULES);
        prompt.push_str("\n\nGenerate the game config as JSON.");
        prompt
    }

    /// JSON schema for the generator's structured output.
    pub fn response_schema() -> Value {
        let types: Vec<&str> = ExperienceType::without_camera().map(|t| t.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "gameType": { "type": "string", "enum": types },
                "reasoning": { "type": "string" },
                "config": {
                    "type": "object",
                    "properties": {
                        "scrollSpeed": { "type": "number" },
                        "obstacleDensity": { "type": "number" },
                        "terrainHeights": { "type": "array", "items": { "type": "number" } },
                        "theme": { "type": "string", "enum": ["day", "night"] },
                        "difficulty": { "type": "number" },
                        "flavor": { "type": "string" },
                        "mood": { "type": "string" },
                        "narrativeHook": { "type": "string" }
                    },
                    "required": ["scrollSpeed", "obstacleDensity", "theme"]
                }
            },
            "required": ["gameType", "reasoning", "config"]
        })
    }

    /// The variety pool, plus the camera type when the engine chose it.
    fn offered_types(suggested: ExperienceType) -> Vec<ExperienceType> {
        let mut types: Vec<ExperienceType> = ExperienceType::without_camera().collect();
        if suggested.requires_camera() {
            types.push(suggested);
        }
        types
    }

    fn decision_note(outcome: &DecisionOutcome) -> String {
        if outcome.path.is_empty() {
            return String::new();
        }
        format!(
            "\nDECISION TREE: A decision tree suggested \"{}\" because: {}. You may use it or \
             override with a different gameType if the data strongly supports it; explain your \
             choice in reasoning.\n",
            outcome.suggested_type, outcome.path
        )
    }

    fn signal_note(outcome: &DecisionOutcome) -> String {
        let scores = &outcome.signal_scores;
        let context = &outcome.niche_context;
        format!(
            "\nNICHE SIGNAL SCORES: music={:.2}, terrain={:.2}, news={:.2}, image={:.2}, \
             weather={:.2}. Dominant: {}. Vibes: place={}, news={}, weather={}, music={}.\n",
            scores.music,
            scores.terrain,
            scores.news,
            scores.image,
            scores.weather,
            context.dominant_signal,
            vibe_name(context.place_vibe),
            vibe_name(context.news_vibe),
            vibe_name(context.weather_vibe),
            vibe_name(context.music_vibe),
        )
    }

    fn variety_note(recent: &[ExperienceType]) -> String {
        if recent.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = recent.iter().map(|t| t.as_str()).collect();
        format!(
            "\nVARIETY: User recently played: {}. Pick a DIFFERENT game type and config.\n",
            names.join(", ")
        )
    }
}

/// Wire name of a vibe, or `n/a` when it was not derived.
fn vibe_name<T: Serialize>(vibe: Option<T>) -> String {
    vibe.and_then(|v| serde_json::to_value(v).ok())
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "n/a".to_string())
}
