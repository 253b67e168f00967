//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sources` - Signal sources over HTTP (news, weather, terrain, playback)
//! - `ai` - Content generators (Gemini, offline, mock)
//! - `history` - In-memory history store
//! - `postgres` - PostgreSQL history store
//! - `http` - axum endpoints

pub mod ai;
pub mod history;
pub mod http;
pub mod postgres;
pub mod sources;

pub use ai::{GeminiConfig, GeminiContentGenerator, MockContentGenerator, OfflineContentGenerator};
pub use history::InMemoryHistoryStore;
pub use postgres::PostgresHistoryStore;
pub use sources::{
    GoogleMapsTerrainSource, GoogleNewsRssSource, NewsApiSource, OpenMeteoSource,
    SpotifyPlaybackSource,
};
