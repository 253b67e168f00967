//! ExperienceType enum - the closed set of mini-games the engine can pick.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The mini-games a personalization request can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    EndlessRunner,
    ObstacleDodge,
    RhythmTap,
    MemoryMatch,
    Trivia,
    ReactionTest,
    FaceDodge,
}

impl ExperienceType {
    /// Returns all experience types in canonical order.
    pub fn all() -> &'static [ExperienceType] {
        &[
            ExperienceType::EndlessRunner,
            ExperienceType::ObstacleDodge,
            ExperienceType::RhythmTap,
            ExperienceType::MemoryMatch,
            ExperienceType::Trivia,
            ExperienceType::ReactionTest,
            ExperienceType::FaceDodge,
        ]
    }

    /// Types that can be offered without a camera; the variety pool.
    pub fn without_camera() -> impl Iterator<Item = ExperienceType> {
        Self::all().iter().copied().filter(|t| !t.requires_camera())
    }

    /// Face dodge tracks the player's face and is only chosen on request.
    pub fn requires_camera(&self) -> bool {
        matches!(self, ExperienceType::FaceDodge)
    }

    /// Stable wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceType::EndlessRunner => "endless_runner",
            ExperienceType::ObstacleDodge => "obstacle_dodge",
            ExperienceType::RhythmTap => "rhythm_tap",
            ExperienceType::MemoryMatch => "memory_match",
            ExperienceType::Trivia => "trivia",
            ExperienceType::ReactionTest => "reaction_test",
            ExperienceType::FaceDodge => "face_dodge",
        }
    }

    /// One-line description used when briefing the content generator.
    pub fn brief(&self) -> &'static str {
        match self {
            ExperienceType::EndlessRunner => {
                "Terrain-driven. Use elevation for terrainHeights. Good when: elevation data, mountainous placeTypes, or outdoor news themes."
            }
            ExperienceType::ObstacleDodge => {
                "Mixed data. Use news themes, placeTypes, weather for obstacle feel. Good when: varied data or no strong signal."
            }
            ExperienceType::RhythmTap => {
                "Music-driven. Tempo directly sets beat speed. Good when: tempo present, or calming themes."
            }
            ExperienceType::MemoryMatch => {
                "Match pairs from uploaded image. Good when: image present and calm themes."
            }
            ExperienceType::Trivia => "Answer questions from news headlines. Good when: news dominant.",
            ExperienceType::ReactionTest => {
                "Tap/click on cue. Good when: high tempo or energetic news."
            }
            ExperienceType::FaceDodge => {
                "Camera-controlled dodging with the player's face. Only when the camera was requested."
            }
        }
    }
}

impl fmt::Display for ExperienceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ValidationError::unrecognized("experience_type", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_seven_types() {
        assert_eq!(ExperienceType::all().len(), 7);
    }

    #[test]
    fn variety_pool_excludes_face_dodge() {
        let pool: Vec<_> = ExperienceType::without_camera().collect();
        assert_eq!(pool.len(), 6);
        assert!(!pool.contains(&ExperienceType::FaceDodge));
    }

    #[test]
    fn as_str_matches_serde_name() {
        for t in ExperienceType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "Rhythm_Tap".parse::<ExperienceType>().unwrap(),
            ExperienceType::RhythmTap
        );
        assert_eq!(
            " trivia ".parse::<ExperienceType>().unwrap(),
            ExperienceType::Trivia
        );
    }

    #[test]
    fn rejects_unknown_type() {
        assert!("real_world_task".parse::<ExperienceType>().is_err());
    }
}
