//! Integration tests for the experience HTTP endpoints.
//!
//! These tests drive the full router with stub signal sources, the mock
//! content generator and the in-memory history store:
//! 1. Caller identification is enforced
//! 2. Request bodies flow through gathering, the engine and generation
//! 3. Responses carry the decision and pipeline details

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use recess::adapters::ai::MockContentGenerator;
use recess::adapters::history::InMemoryHistoryStore;
use recess::adapters::http::{experience_router, ExperienceAppState};
use recess::application::{
    EngineSettings, GatherMetricsHandler, GenerateExperienceHandler, DEFAULT_HISTORY_LIMIT,
};
use recess::config::EngineConfig;
use recess::domain::foundation::{Coordinates, UserId};
use recess::domain::personalization::{ExperienceType, SpotifyMetrics, WeatherMetrics};
use recess::domain::signals::Headline;
use recess::ports::{
    GenerationError, HistoryStore, NewsFeed, NewsSource, PlaybackSource, SourceError,
    TerrainSource, WeatherSource,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct StubNews;

#[async_trait]
impl NewsSource for StubNews {
    fn feeds(&self) -> Vec<NewsFeed> {
        vec![NewsFeed::new("general", 5)]
    }

    async fn fetch_headlines(&self, _feed: NewsFeed) -> Result<Vec<Headline>, SourceError> {
        Err(SourceError::unavailable("stub-news", "offline"))
    }
}

struct StubWeather(Option<&'static str>);

#[async_trait]
impl WeatherSource for StubWeather {
    async fn fetch_weather(
        &self,
        _coordinates: Coordinates,
    ) -> Result<Option<WeatherMetrics>, SourceError> {
        Ok(self.0.map(|condition| WeatherMetrics {
            temp: 20.0,
            condition: condition.to_string(),
            humidity: None,
        }))
    }
}

struct StubTerrain;

#[async_trait]
impl TerrainSource for StubTerrain {
    async fn fetch_elevation(&self, coordinates: Coordinates) -> Result<Option<f64>, SourceError> {
        // Denver is high, everywhere else is flat.
        Ok((coordinates.lat() > 39.0 && coordinates.lat() < 40.0).then_some(1609.0))
    }

    async fn fetch_place_types(
        &self,
        _coordinates: Coordinates,
    ) -> Result<Vec<String>, SourceError> {
        Ok(Vec::new())
    }
}

struct StubPlayback;

#[async_trait]
impl PlaybackSource for StubPlayback {
    async fn fetch_playback(
        &self,
        _token: &SecretString,
    ) -> Result<Option<SpotifyMetrics>, SourceError> {
        Ok(Some(SpotifyMetrics {
            is_playing: Some(true),
            tempo: Some(140.0),
            track_name: Some("Sprint".to_string()),
            artist_name: Some("Runner".to_string()),
        }))
    }
}

struct TestApp {
    router: Router,
    generator: Arc<MockContentGenerator>,
    history: Arc<InMemoryHistoryStore>,
}

fn test_app(weather: Option<&'static str>, generator: MockContentGenerator) -> TestApp {
    let generator = Arc::new(generator);
    let history = Arc::new(InMemoryHistoryStore::with_cap(
        EngineConfig::default().history_limit,
    ));

    let gather = GatherMetricsHandler::new(
        Arc::new(StubNews),
        Arc::new(StubWeather(weather)),
        Arc::new(StubTerrain),
    )
    .with_playback(Arc::new(StubPlayback));
    let generate = GenerateExperienceHandler::with_settings(
        generator.clone(),
        history.clone(),
        EngineSettings {
            variety_seed: Some(11),
            ..Default::default()
        },
    );

    let state = ExperienceAppState::new(Arc::new(gather), Arc::new(generate));
    TestApp {
        router: experience_router().with_state(state),
        generator,
        history,
    }
}

fn post(user: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/experiences")
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Identification
// =============================================================================

#[tokio::test]
async fn missing_user_header_is_unauthorized() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, body) = send(&app.router, post(None, json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn blank_user_header_is_unauthorized() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, _) = send(&app.router, post(Some("  "), json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn empty_request_falls_back_to_security_leaf() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, body) = send(&app.router, post(Some("user-1"), json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameType"], "obstacle_dodge");
    assert_eq!(body["decision"]["suggestedType"], "obstacle_dodge");
    let path = body["decision"]["path"].as_array().unwrap();
    assert_eq!(path.last().unwrap(), "security_leaf:fallback");
    assert!(body["sessionId"].as_str().is_some());
    assert_eq!(body["pipeline"]["sourcesIngested"], json!([]));
    assert_eq!(body["config"]["terrainHeights"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn location_drives_the_terrain_branch() {
    let app = test_app(Some("clear"), MockContentGenerator::new());

    let (status, body) = send(
        &app.router,
        post(Some("user-1"), json!({ "lat": 39.7392, "lng": -104.9903 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameType"], "endless_runner");
    assert_eq!(body["decision"]["nicheContext"]["dominantSignal"], "terrain");
    assert_eq!(
        body["pipeline"]["sourcesIngested"],
        json!(["weather", "terrain"])
    );
}

#[tokio::test]
async fn playback_token_brings_in_live_music() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, body) = send(
        &app.router,
        post(Some("user-1"), json!({ "playbackToken": "spotify-token" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameType"], "reaction_test");
    assert!(body["pipeline"]["sourcesIngested"]
        .as_array()
        .unwrap()
        .contains(&json!("spotify")));
}

#[tokio::test]
async fn body_metrics_override_gathered_ones() {
    let app = test_app(Some("clear"), MockContentGenerator::new());

    let (status, body) = send(
        &app.router,
        post(
            Some("user-1"),
            json!({ "metrics": { "weather": { "temp": 25.0, "condition": "thunderstorm" } } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["path"][1], "priority_weather:extreme");

    let calls = app.generator.get_calls();
    assert_eq!(
        calls[0].metrics.weather.as_ref().unwrap().condition,
        "thunderstorm"
    );
}

#[tokio::test]
async fn camera_flag_yields_face_dodge() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, body) = send(
        &app.router,
        post(Some("user-1"), json!({ "useCamera": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameType"], "face_dodge");
}

#[tokio::test]
async fn repeated_requests_rotate_through_history() {
    let app = test_app(None, MockContentGenerator::new());

    let (_, first) = send(&app.router, post(Some("user-1"), json!({}))).await;
    let (_, second) = send(&app.router, post(Some("user-1"), json!({}))).await;

    assert_eq!(first["gameType"], "obstacle_dodge");
    assert_ne!(second["gameType"], "obstacle_dodge");

    let user = UserId::new("user-1").unwrap();
    let recent = app.history.recent_types(&user, 5).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[1], ExperienceType::ObstacleDodge);
}

#[tokio::test]
async fn in_memory_history_keeps_only_the_engine_window() {
    let app = test_app(None, MockContentGenerator::new());

    for _ in 0..DEFAULT_HISTORY_LIMIT + 3 {
        let (status, _) = send(&app.router, post(Some("user-1"), json!({}))).await;
        assert_eq!(status, StatusCode::OK);
    }
    send(&app.router, post(Some("user-2"), json!({}))).await;

    let user = UserId::new("user-1").unwrap();
    assert_eq!(app.history.entries_for(&user).len(), DEFAULT_HISTORY_LIMIT);
    assert_eq!(app.history.len(), DEFAULT_HISTORY_LIMIT + 1);
}

#[tokio::test]
async fn quota_exhaustion_serves_default_bundle() {
    let app = test_app(
        None,
        MockContentGenerator::new().with_error(GenerationError::rate_limited(30)),
    );

    let (status, body) = send(&app.router, post(Some("user-1"), json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameType"], "obstacle_dodge");
    assert_eq!(body["pipeline"]["usedFallback"], true);
}

#[tokio::test]
async fn generator_outage_is_bad_gateway() {
    let app = test_app(
        None,
        MockContentGenerator::new().with_error(GenerationError::unavailable("overloaded")),
    );

    let (status, body) = send(&app.router, post(Some("user-1"), json!({}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "GENERATION_FAILED");
    assert!(app.history.is_empty());
}

#[tokio::test]
async fn lone_coordinate_is_bad_request() {
    let app = test_app(None, MockContentGenerator::new());

    let (status, body) = send(&app.router, post(Some("user-1"), json!({ "lat": 10.0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_is_ok() {
    let app = test_app(None, MockContentGenerator::new());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
