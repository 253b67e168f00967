//! Experience handlers.
//!
//! - `GatherMetricsHandler` - Collects signals from every source, softly
//! - `GenerateExperienceHandler` - Decides, generates and records one experience

mod gather_metrics;
mod generate_experience;

pub use gather_metrics::{
    GatherMetricsCommand, GatherMetricsHandler, GatherSettings, GatheredMetrics,
};
pub use generate_experience::{
    EngineSettings, ExperienceError, GenerateExperienceCommand, GenerateExperienceHandler,
    GenerateExperienceResult, DEFAULT_HISTORY_LIMIT,
};
