//! Recess - Signal-driven personalization engine
//!
//! This crate picks a mini-game for each user from ambient signals (news,
//! weather, terrain, music, an optional photo), explains the choice as a
//! decision path, and has a content generator fill in the parameters.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
