//! HTTP handlers for experience endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireUser;
use crate::application::{
    GatherMetricsCommand, GatherMetricsHandler, GenerateExperienceCommand,
    GenerateExperienceHandler,
};
use crate::domain::foundation::Coordinates;

use super::dto::{ExperienceResponse, GenerateExperienceRequest, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ExperienceAppState {
    pub gather_handler: Arc<GatherMetricsHandler>,
    pub generate_handler: Arc<GenerateExperienceHandler>,
}

impl ExperienceAppState {
    pub fn new(
        gather_handler: Arc<GatherMetricsHandler>,
        generate_handler: Arc<GenerateExperienceHandler>,
    ) -> Self {
        Self {
            gather_handler,
            generate_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/experiences - Gather signals and generate a personalized experience
pub async fn create_experience(
    State(state): State<ExperienceAppState>,
    RequireUser(user_id): RequireUser,
    Json(req): Json<GenerateExperienceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let coordinates = parse_coordinates(req.lat, req.lng)?;

    let gathered = state
        .gather_handler
        .handle(GatherMetricsCommand {
            coordinates,
            playback_token: req.playback_token.map(SecretString::new),
        })
        .await;

    let metrics = match req.metrics {
        Some(overrides) => gathered.metrics.clone().merged_with(overrides),
        None => gathered.metrics.clone(),
    };

    let result = state
        .generate_handler
        .handle(GenerateExperienceCommand {
            user_id,
            metrics,
            has_image: req.has_image,
            use_camera: req.use_camera,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(ExperienceResponse::from_parts(gathered, result)),
    ))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Both or neither; a lone coordinate is a client bug.
fn parse_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>, ApiError> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => Coordinates::try_new(lat, lng)
            .map(Some)
            .map_err(|e| ApiError::bad_request(e.to_string())),
        _ => Err(ApiError::bad_request("lat and lng must be sent together")),
    }
}
