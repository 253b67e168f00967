//! Offline Generator - ContentGenerator that never leaves the process.
//!
//! Serves tuned parameters with canned reasoning. Used in demo mode when no
//! language model key is configured, so the service stays fully usable.

use async_trait::async_trait;

use crate::domain::content::{DraftGameConfig, GameConfig, GenerationRequest, ParameterTuner};
use crate::domain::personalization::{ExperienceType, NewsVibe, WeatherVibe};
use crate::ports::{ContentGenerator, GenerationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineContentGenerator;

impl OfflineContentGenerator {
    pub fn new() -> Self {
        Self
    }

    fn reasoning(request: &GenerationRequest) -> String {
        let outcome = &request.outcome;
        let context = &outcome.niche_context;

        let opener = match outcome.suggested_type {
            ExperienceType::EndlessRunner => "the terrain said touch grass so now you're running through it",
            ExperienceType::ObstacleDodge => "life keeps throwing stuff at you so we made it a game",
            ExperienceType::RhythmTap => "your music is giving main character so tap along bestie",
            ExperienceType::MemoryMatch => "that pic lowkey slaps, now remember where everything went",
            ExperienceType::Trivia => "you've been doomscrolling, time to prove you actually read it",
            ExperienceType::ReactionTest => "that tempo has your cortisol spiking, test those reflexes",
            ExperienceType::FaceDodge => "camera on, face in, dodge like your screen time depends on it",
        };

        let aside = if context.weather_vibe == Some(WeatherVibe::Extreme) {
            Some("the forecast is actively hostile")
        } else if context.news_vibe == Some(NewsVibe::Tense) {
            Some("the headlines are not okay")
        } else {
            None
        };

        match aside {
            Some(aside) => format!("Demo mode: {} ({} fr).", opener, aside),
            None => format!("Demo mode: {}.", opener),
        }
    }
}

#[async_trait]
impl ContentGenerator for OfflineContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<DraftGameConfig, GenerationError> {
        let config = GameConfig {
            game_type: request.suggested_type(),
            reasoning: Self::reasoning(request),
            config: ParameterTuner::tune(&request.metrics, &request.outcome),
        };
        Ok(config.into())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}
