//! Recess HTTP server.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use reqwest::Client;
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use recess::adapters::ai::{GeminiConfig, GeminiContentGenerator, OfflineContentGenerator};
use recess::adapters::history::InMemoryHistoryStore;
use recess::adapters::http::{experience_router, ExperienceAppState};
use recess::adapters::postgres::PostgresHistoryStore;
use recess::adapters::sources::{
    GoogleMapsTerrainSource, GoogleNewsRssSource, NewsApiSource, OpenMeteoSource,
    SpotifyPlaybackSource,
};
use recess::application::{GatherMetricsHandler, GenerateExperienceHandler};
use recess::config::AppConfig;
use recess::ports::{ContentGenerator, HistoryStore, NewsSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let client = Client::builder().user_agent("Recess/1.0").build()?;

    let gather = build_gather_handler(&config, client.clone())?;
    let generate = GenerateExperienceHandler::with_settings(
        build_generator(&config, client),
        build_history(&config).await?,
        config.engine.settings(),
    );
    let state = ExperienceAppState::new(Arc::new(gather), Arc::new(generate));

    let app = with_layers(experience_router().with_state(state), &config);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "recess listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// JSON lines in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_gather_handler(
    config: &AppConfig,
    client: Client,
) -> Result<GatherMetricsHandler, recess::config::ValidationError> {
    let sources = &config.sources;
    let timeout = sources.timeout();

    let news: Arc<dyn NewsSource> = match sources.news_api_key.clone() {
        Some(key) if sources.has_news_api() => {
            Arc::new(NewsApiSource::new(key, client.clone()).with_timeout(timeout))
        }
        _ => {
            tracing::info!("no news API key, using Google News RSS");
            Arc::new(GoogleNewsRssSource::new(client.clone()).with_timeout(timeout))
        }
    };
    let maps_key = sources
        .google_maps_api_key
        .clone()
        .filter(|_| sources.has_google_maps());

    Ok(GatherMetricsHandler::new(
        news,
        Arc::new(OpenMeteoSource::new(client.clone()).with_timeout(timeout)),
        Arc::new(GoogleMapsTerrainSource::new(maps_key, client.clone()).with_timeout(timeout)),
    )
    .with_playback(Arc::new(
        SpotifyPlaybackSource::new(client).with_timeout(timeout),
    ))
    .with_settings(sources.gather_settings()?))
}

fn build_generator(config: &AppConfig, client: Client) -> Arc<dyn ContentGenerator> {
    let ai = &config.ai;
    match ai.gemini_api_key.clone() {
        Some(key) if ai.has_gemini() => {
            let gemini = GeminiConfig::from_secret(key)
                .with_model(ai.model.clone())
                .with_base_url(ai.base_url.clone())
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            Arc::new(GeminiContentGenerator::new(gemini, client))
        }
        _ => {
            tracing::warn!("no Gemini API key, running in demo mode");
            Arc::new(OfflineContentGenerator::new())
        }
    }
}

async fn build_history(config: &AppConfig) -> Result<Arc<dyn HistoryStore>, Box<dyn std::error::Error>> {
    let db = &config.database;
    let Some(url) = db.url() else {
        tracing::info!("no database configured, keeping history in memory");
        return Ok(Arc::new(InMemoryHistoryStore::with_cap(
            config.engine.history_limit,
        )));
    };

    let pool = PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .connect(url)
        .await?;
    let store = PostgresHistoryStore::new(pool);
    if db.run_migrations {
        store.migrate().await?;
    }
    Ok(Arc::new(store))
}

fn with_layers(router: Router, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    };

    router
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
