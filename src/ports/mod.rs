//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Signal Ports
//!
//! - `NewsSource` - Headline feeds
//! - `WeatherSource` - Current conditions
//! - `TerrainSource` - Elevation and nearby place types
//! - `PlaybackSource` - Live music playback
//!
//! All signal ports share `SourceError` and fail softly.
//!
//! ## Generation Ports
//!
//! - `ContentGenerator` - Decision to game bundle
//! - `HistoryStore` - Recently delivered experiences per user

mod content_generator;
mod history_store;
mod news_source;
mod playback_source;
mod source_error;
mod terrain_source;
mod weather_source;

pub use content_generator::{ContentGenerator, GenerationError};
pub use history_store::{HistoryEntry, HistoryError, HistoryStore};
pub use news_source::{NewsFeed, NewsSource};
pub use playback_source::PlaybackSource;
pub use source_error::SourceError;
pub use terrain_source::TerrainSource;
pub use weather_source::WeatherSource;
