//! Content Generator Adapters.
//!
//! Implementations of the ContentGenerator port.
//!
//! ## Available Adapters
//!
//! - `GeminiContentGenerator` - Google Gemini models in JSON response mode
//! - `OfflineContentGenerator` - Tuned parameters and canned reasoning (demo mode)
//! - `MockContentGenerator` - Configurable mock for testing

mod gemini_generator;
mod mock_generator;
mod offline_generator;

pub use gemini_generator::{
    GeminiConfig, GeminiContentGenerator, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_generator::MockContentGenerator;
pub use offline_generator::OfflineContentGenerator;
