//! End-to-end scenarios for the decision engine.
//!
//! These tests drive the public engine API the way the application layer
//! does: metrics in, suggestion and decision path out.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use recess::domain::content::{GameConfig, ParameterTuner, Theme};
use recess::domain::personalization::{
    labels, DecisionOptions, DecisionOutcome, DecisionTree, ExperienceType, FixedPicker,
    LandscapeMetrics, RngPicker, SignalKind, SpotifyMetrics, UserMetrics, WeatherMetrics,
};

fn evaluate(metrics: &UserMetrics, options: &DecisionOptions) -> DecisionOutcome {
    DecisionTree::evaluate(metrics, options, &mut FixedPicker(0))
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn high_clear_terrain_picks_a_runner() {
    let metrics = UserMetrics {
        weather: Some(WeatherMetrics {
            temp: 22.0,
            condition: "clear".to_string(),
            humidity: None,
        }),
        landscape: Some(LandscapeMetrics {
            elevation: Some(800.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let outcome = evaluate(&metrics, &DecisionOptions::default());

    assert_eq!(outcome.suggested_type, ExperienceType::EndlessRunner);
    assert!(outcome.path.contains(labels::TERRAIN_DOMINANT));
    assert!(outcome.path.contains(labels::TERRAIN_ELEVATION_HIGH));
    assert_eq!(outcome.niche_context.dominant_signal, SignalKind::Terrain);
}

#[test]
fn fast_live_music_picks_reaction() {
    let metrics = UserMetrics {
        spotify: Some(SpotifyMetrics {
            tempo: Some(130.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let outcome = evaluate(&metrics, &DecisionOptions::default());

    assert_eq!(outcome.suggested_type, ExperienceType::ReactionTest);
    assert!(outcome.path.contains(labels::MUSIC_DOMINANT));
    assert!(outcome.path.contains(labels::MUSIC_TEMPO_FAST));
}

#[test]
fn empty_metrics_fall_through_to_security_leaf() {
    let outcome = evaluate(&UserMetrics::default(), &DecisionOptions::default());

    assert_eq!(outcome.suggested_type, ExperienceType::ObstacleDodge);
    assert_eq!(outcome.path.last(), Some(labels::SECURITY_LEAF));
}

#[test]
fn camera_request_overrides_everything() {
    let metrics = UserMetrics {
        spotify: Some(SpotifyMetrics {
            tempo: Some(130.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    let options = DecisionOptions {
        use_camera: true,
        recent_types: vec![ExperienceType::FaceDodge],
        ..Default::default()
    };

    let outcome = evaluate(&metrics, &options);

    assert_eq!(outcome.suggested_type, ExperienceType::FaceDodge);
    assert_eq!(outcome.path.last(), Some(labels::CAMERA_OVERRIDE));
}

#[test]
fn variety_never_repeats_while_alternatives_remain() {
    let metrics = UserMetrics {
        spotify: Some(SpotifyMetrics {
            tempo: Some(130.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    let recent = vec![
        ExperienceType::ReactionTest,
        ExperienceType::RhythmTap,
        ExperienceType::Trivia,
    ];
    let options = DecisionOptions {
        recent_types: recent.clone(),
        ..Default::default()
    };

    for seed in 0..25 {
        let mut picker = RngPicker::new(ChaCha8Rng::seed_from_u64(seed));
        let outcome = DecisionTree::evaluate(&metrics, &options, &mut picker);

        assert!(!recent.contains(&outcome.suggested_type));
        assert_ne!(outcome.suggested_type, ExperienceType::FaceDodge);
        assert!(outcome
            .path
            .contains("variety_override:reaction_test_recently_played"));
    }
}

// =============================================================================
// Engine output flowing into content
// =============================================================================

#[test]
fn tuned_parameters_follow_the_weather() {
    let metrics = UserMetrics {
        weather: Some(WeatherMetrics {
            temp: -4.0,
            condition: "snow".to_string(),
            humidity: Some(70.0),
        }),
        ..Default::default()
    };
    let outcome = evaluate(&metrics, &DecisionOptions::default());

    let params = ParameterTuner::tune(&metrics, &outcome);

    assert_eq!(params.theme, Theme::Night);
    assert!(params.difficulty >= 6);
    assert_eq!(params.terrain_heights.len(), 15);
}

#[test]
fn sanitized_bundle_is_always_renderable() {
    let outcome = evaluate(&UserMetrics::default(), &DecisionOptions::default());
    let draft = serde_json::from_value(serde_json::json!({
        "gameType": "not_a_game",
        "config": { "scrollSpeed": 99, "obstacleDensity": -1, "difficulty": 42.6 }
    }))
    .unwrap();

    let game = GameConfig::sanitize(draft, outcome.suggested_type);

    assert_eq!(game.game_type, outcome.suggested_type);
    assert_eq!(game.config.scroll_speed, 15.0);
    assert_eq!(game.config.obstacle_density, 0.0);
    assert_eq!(game.config.difficulty, 10);
    assert!(!game.reasoning.is_empty());
}
