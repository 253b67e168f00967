//! HTTP adapters - REST API implementations.

pub mod error;
pub mod experience;
pub mod middleware;

pub use error::{ApiError, ErrorResponse};
pub use experience::{experience_router, ExperienceAppState};
