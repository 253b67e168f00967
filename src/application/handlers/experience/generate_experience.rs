//! GenerateExperienceHandler - Command handler for producing a game bundle.
//!
//! Runs the decision engine over gathered metrics, asks the content
//! generator to dress the decision up, validates the result and records it
//! in the user's history.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::domain::content::{GameConfig, GenerationRequest};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::personalization::{
    DecisionOptions, DecisionOutcome, DecisionTree, ExperienceType, RngPicker, UserMetrics,
};
use crate::ports::{ContentGenerator, GenerationError, HistoryEntry, HistoryStore};

pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Command to generate one experience.
#[derive(Debug, Clone)]
pub struct GenerateExperienceCommand {
    pub user_id: UserId,
    pub metrics: UserMetrics,
    pub has_image: bool,
    pub use_camera: bool,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateExperienceResult {
    pub session_id: SessionId,
    pub game: GameConfig,
    pub outcome: DecisionOutcome,
    /// True when the generator was out of quota and the default bundle was served.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExperienceError {
    #[error("content generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// How many recent experiences the variety filter looks at.
    pub history_limit: usize,
    /// Fixed seed for the variety draw; entropy when absent.
    pub variety_seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            variety_seed: None,
        }
    }
}

pub struct GenerateExperienceHandler {
    generator: Arc<dyn ContentGenerator>,
    history: Arc<dyn HistoryStore>,
    history_limit: usize,
    rng: Mutex<ChaCha8Rng>,
}

impl GenerateExperienceHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, history: Arc<dyn HistoryStore>) -> Self {
        Self::with_settings(generator, history, EngineSettings::default())
    }

    pub fn with_settings(
        generator: Arc<dyn ContentGenerator>,
        history: Arc<dyn HistoryStore>,
        settings: EngineSettings,
    ) -> Self {
        let rng = match settings.variety_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            generator,
            history,
            history_limit: settings.history_limit,
            rng: Mutex::new(rng),
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateExperienceCommand,
    ) -> Result<GenerateExperienceResult, ExperienceError> {
        // 1. Recent history (soft)
        let recent_types = self.recent_types(&cmd.user_id).await;

        // 2. Decide
        let options = DecisionOptions {
            has_image: cmd.has_image,
            use_camera: cmd.use_camera,
            recent_types: recent_types.clone(),
        };
        let outcome = self.evaluate(&cmd.metrics, &options);
        tracing::debug!(
            user_id = %cmd.user_id,
            suggested = %outcome.suggested_type,
            path = %outcome.path,
            "decision tree evaluated"
        );

        // 3. Generate
        let suggested = outcome.suggested_type;
        let request = GenerationRequest {
            metrics: cmd.metrics,
            outcome: outcome.clone(),
            recent_types,
            has_image: cmd.has_image,
            requested_at: Timestamp::now(),
        };
        let (game, used_fallback) = match self.generator.generate(&request).await {
            Ok(draft) => (GameConfig::sanitize(draft, suggested), false),
            Err(err) if err.is_quota() => {
                tracing::warn!(
                    generator = self.generator.name(),
                    error = %err,
                    "generator out of quota, serving default bundle"
                );
                (GameConfig::default_bundle(), true)
            }
            Err(err) => {
                tracing::error!(generator = self.generator.name(), error = %err, "generation failed");
                return Err(err.into());
            }
        };

        // 4. Record (soft)
        let entry = HistoryEntry::new(cmd.user_id.clone(), game.clone());
        let session_id = entry.session_id;
        if let Err(err) = self.history.record(entry).await {
            tracing::warn!(user_id = %cmd.user_id, error = %err, "failed to record history");
        }

        tracing::info!(
            user_id = %cmd.user_id,
            session_id = %session_id,
            suggested = %suggested,
            game_type = %game.game_type,
            used_fallback,
            "experience generated"
        );

        Ok(GenerateExperienceResult {
            session_id,
            game,
            outcome,
            used_fallback,
        })
    }

    async fn recent_types(&self, user_id: &UserId) -> Vec<ExperienceType> {
        match self.history.recent_types(user_id, self.history_limit).await {
            Ok(types) => types,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "history unavailable, skipping variety");
                Vec::new()
            }
        }
    }

    fn evaluate(&self, metrics: &UserMetrics, options: &DecisionOptions) -> DecisionOutcome {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut picker = RngPicker::new(&mut *rng);
        DecisionTree::evaluate(metrics, options, &mut picker)
    }
}
