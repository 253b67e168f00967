//! Data transfer objects for experience HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{GatheredMetrics, GenerateExperienceResult};
use crate::domain::content::GameParameters;
use crate::domain::personalization::{
    DecisionPath, ExperienceType, NicheContext, SignalScores, UserMetrics,
};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to generate an experience.
///
/// Every field is optional; an empty object is a valid request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateExperienceRequest {
    /// Caller location. Sent together with `lng` or not at all.
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// Client-side metrics; each record present replaces the gathered one.
    #[serde(default)]
    pub metrics: Option<UserMetrics>,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub use_camera: bool,
    /// Spotify access token for live playback.
    #[serde(default)]
    pub playback_token: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResponse {
    pub session_id: String,
    pub game_type: ExperienceType,
    pub reasoning: String,
    pub config: GameParameters,
    pub decision: DecisionView,
    pub pipeline: PipelineView,
}

/// Why the engine suggested what it did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionView {
    pub suggested_type: ExperienceType,
    pub path: DecisionPath,
    pub signal_scores: SignalScores,
    pub niche_context: NicheContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineView {
    pub sources_ingested: Vec<String>,
    pub run_at: String,
    #[serde(default)]
    pub used_fallback: bool,
}

impl ExperienceResponse {
    pub fn from_parts(gathered: GatheredMetrics, result: GenerateExperienceResult) -> Self {
        let outcome = result.outcome;
        Self {
            session_id: result.session_id.to_string(),
            game_type: result.game.game_type,
            reasoning: result.game.reasoning,
            config: result.game.config,
            decision: DecisionView {
                suggested_type: outcome.suggested_type,
                path: outcome.path,
                signal_scores: outcome.signal_scores,
                niche_context: outcome.niche_context,
            },
            pipeline: PipelineView {
                sources_ingested: gathered.sources_ingested,
                run_at: gathered.run_at.to_rfc3339(),
                used_fallback: result.used_fallback,
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
