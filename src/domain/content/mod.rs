//! Content Module - turns an engine decision into a playable bundle.
//!
//! - `GameConfig` - Validated bundle, default fallback and draft sanitizing
//! - `ParameterTuner` - Deterministic parameter derivation
//! - `PromptBuilder` - Generator prompt and response schema

mod game_config;
mod prompt;
mod tuner;

pub use game_config::{
    DraftGameConfig, DraftParameters, GameConfig, GameParameters, Theme, DEFAULT_DIFFICULTY,
    DEFAULT_OBSTACLE_DENSITY, DEFAULT_SCROLL_SPEED, DEFAULT_TERRAIN_HEIGHT, MAX_TERRAIN_SAMPLES,
    TERRAIN_SAMPLES,
};
pub use prompt::{GenerationRequest, PromptBuilder};
pub use tuner::ParameterTuner;
