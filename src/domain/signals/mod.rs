//! Signals Module - shapes raw source data into engine metrics.
//!
//! - `NewsDigest` - Deduplication and theme extraction over headlines
//! - `weather_code_label` - WMO code to condition label

mod news_digest;
mod weather_codes;

pub use news_digest::{Headline, NewsDigest, MAX_HEADLINES, MAX_THEMES};
pub use weather_codes::weather_code_label;
