//! Signal Source Adapters.
//!
//! HTTP implementations of the signal ports over a shared `reqwest::Client`.
//!
//! ## Available Adapters
//!
//! - `NewsApiSource` - newsapi.org top headlines (needs a key)
//! - `GoogleNewsRssSource` - Google News RSS (keyless fallback)
//! - `OpenMeteoSource` - Open-Meteo current weather
//! - `GoogleMapsTerrainSource` - Elevation (OpenTopoData fallback) and nearby places
//! - `SpotifyPlaybackSource` - Spotify player state and tempo

mod google_maps;
mod google_news_rss;
mod news_api;
mod open_meteo;
mod spotify;

pub use google_maps::{GoogleMapsTerrainSource, GOOGLE_MAPS_BASE_URL, OPEN_TOPO_BASE_URL};
pub use google_news_rss::{GoogleNewsRssSource, GOOGLE_NEWS_RSS_URL};
pub use news_api::{NewsApiSource, NEWS_API_BASE_URL};
pub use open_meteo::{OpenMeteoSource, OPEN_METEO_BASE_URL};
pub use spotify::{SpotifyPlaybackSource, SPOTIFY_API_BASE_URL};
