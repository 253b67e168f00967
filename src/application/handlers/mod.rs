//! Application handlers.
//!
//! Command handlers that orchestrate the engine and its ports.

pub mod experience;

pub use experience::{
    EngineSettings, ExperienceError, GatherMetricsCommand, GatherMetricsHandler, GatherSettings,
    GatheredMetrics, GenerateExperienceCommand, GenerateExperienceHandler,
    GenerateExperienceResult, DEFAULT_HISTORY_LIMIT,
};
