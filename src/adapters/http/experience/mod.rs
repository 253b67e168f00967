//! Experience HTTP adapter - the personalization endpoint.
//!
//! Provides endpoints for:
//! - Generating a personalized experience
//! - Health checks

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::ExperienceAppState;
pub use routes::experience_router;
