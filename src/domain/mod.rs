//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, coordinates, errors)
//! - `personalization` - Signal scoring, context classification, decision tree, variety
//! - `signals` - Shaping raw source payloads into engine metrics
//! - `content` - Game configuration, parameter tuning and generator prompts

pub mod content;
pub mod foundation;
pub mod personalization;
pub mod signals;
