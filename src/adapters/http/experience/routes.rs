//! Axum router configuration for experience endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_experience, health, ExperienceAppState};

/// Create the experience API router.
///
/// # Routes
///
/// - `POST /api/experiences` - Generate an experience (requires `x-user-id`)
/// - `GET /health` - Liveness probe
pub fn experience_router() -> Router<ExperienceAppState> {
    Router::new()
        .route("/api/experiences", post(create_experience))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        // Route behavior is covered by the integration tests.
        let _router = experience_router();
    }
}
