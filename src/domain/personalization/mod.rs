//! Personalization Module - picks an experience from ambient user signals.
//!
//! # Components
//!
//! - `SignalNormalizer` - Reduces raw metrics to five scores in [0, 1]
//! - `ContextClassifier` - Derives qualitative vibes and the dominant signal
//! - `DecisionTree` - Ordered rules producing a selection and its path
//! - `VarietyFilter` - Steers away from recently played experiences
//!
//! # Design Philosophy
//!
//! Everything here is pure and synchronous. The only non-determinism is the
//! variety draw, which goes through the injected `VarietyPicker`.

mod decision_path;
mod decision_tree;
mod experience_type;
mod metrics;
mod niche_context;
mod signal_scores;
mod variety;
mod vocabulary;

pub use decision_path::DecisionPath;
pub use decision_tree::{
    labels, situational, DecisionOptions, DecisionOutcome, DecisionTree, RuleInput,
};
pub use experience_type::ExperienceType;
pub use metrics::{
    LandscapeMetrics, NewsMetrics, PlaylistTrack, SpotifyMetrics, UploadedPlaylist, UserMetrics,
    WeatherMetrics,
};
pub use niche_context::{
    dominant_label, ContextClassifier, MusicVibe, NewsVibe, NicheContext, PlaceVibe, WeatherVibe,
};
pub use signal_scores::{SignalKind, SignalNormalizer, SignalScores};
pub use variety::{
    override_label, substitute_label, FixedPicker, RngPicker, VarietyChoice, VarietyFilter,
    VarietyPicker,
};
pub use vocabulary::is_extreme_weather;
