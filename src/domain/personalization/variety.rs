//! Variety Filter - steers away from experiences the user just played.
//!
//! This is the only place randomness enters the engine. The random source is
//! the [`VarietyPicker`] trait so callers and tests control it.

use rand::Rng;

use super::decision_path::DecisionPath;
use super::experience_type::ExperienceType;

/// Chooses an index in `0..len`. `len` is always at least 1.
pub trait VarietyPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform picker over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> VarietyPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same position (clamped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl VarietyPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Result of running a candidate through the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct VarietyChoice {
    pub experience_type: ExperienceType,
    pub path: DecisionPath,
}

pub fn override_label(preferred: ExperienceType) -> String {
    format!("variety_override:{}_recently_played", preferred)
}

pub fn substitute_label(substitute: ExperienceType) -> String {
    format!("variety_substitute:{}", substitute)
}

pub struct VarietyFilter;

impl VarietyFilter {
    /// Keeps `preferred` unless it was played recently and an unplayed
    /// alternative exists, in which case one is drawn uniformly at random.
    pub fn apply(
        preferred: ExperienceType,
        recent: &[ExperienceType],
        mut path: DecisionPath,
        picker: &mut dyn VarietyPicker,
    ) -> VarietyChoice {
        if recent.is_empty() || !recent.contains(&preferred) {
            return VarietyChoice {
                experience_type: preferred,
                path,
            };
        }

        let alternatives: Vec<ExperienceType> = ExperienceType::without_camera()
            .filter(|t| !recent.contains(t))
            .collect();
        if alternatives.is_empty() {
            return VarietyChoice {
                experience_type: preferred,
                path,
            };
        }

        let index = picker.pick(alternatives.len()).min(alternatives.len() - 1);
        let substitute = alternatives[index];
        path.push(override_label(preferred));
        path.push(substitute_label(substitute));

        VarietyChoice {
            experience_type: substitute,
            path,
        }
    }
}
