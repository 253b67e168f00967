//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    EngineSettings, ExperienceError, GatherMetricsCommand, GatherMetricsHandler, GatherSettings,
    GatheredMetrics, GenerateExperienceCommand, GenerateExperienceHandler,
    GenerateExperienceResult, DEFAULT_HISTORY_LIMIT,
};
