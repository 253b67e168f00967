//! Gemini Generator - Implementation of ContentGenerator over Google's Gemini API.
//!
//! Uses the `generateContent` endpoint in JSON response mode with the
//! schema from [`PromptBuilder::response_schema`], so the model answers with
//! a [`DraftGameConfig`] directly.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_timeout(Duration::from_secs(20));
//!
//! let generator = GeminiContentGenerator::new(config, reqwest::Client::new());
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::content::{DraftGameConfig, GenerationRequest, PromptBuilder};
use crate::ports::{ContentGenerator, GenerationError};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MAX_BACKOFF_SECS: u64 = 16;

/// Configuration for the Gemini generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Retries on transient failures. Quota errors are never retried.
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 1,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct GeminiContentGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiContentGenerator {
    pub fn new(config: GeminiConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: PromptBuilder::build(request),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: PromptBuilder::response_schema(),
            },
        }
    }

    async fn send_request(&self, body: &GeminiRequest) -> Result<Response, GenerationError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::classify_failure(status.as_u16(), &error_body))
    }

    /// Maps a failed HTTP exchange to a generation error.
    fn classify_failure(status: u16, body: &str) -> GenerationError {
        let mentions_quota = body.to_lowercase().contains("quota");
        match status {
            429 if mentions_quota => GenerationError::quota_exceeded(body.to_string()),
            429 => GenerationError::rate_limited(Self::parse_retry_after(body)),
            403 if mentions_quota => GenerationError::quota_exceeded(body.to_string()),
            401 | 403 => GenerationError::AuthenticationFailed,
            500..=599 => {
                GenerationError::unavailable(format!("Server error {}: {}", status, body))
            }
            _ => GenerationError::network(format!("Unexpected status {}: {}", status, body)),
        }
    }

    /// Reads `retryDelay` ("17s") from a RetryInfo detail, defaulting to 30.
    fn parse_retry_after(body: &str) -> u32 {
        let Ok(parsed) = serde_json::from_str::<Value>(body) else {
            return 30;
        };
        parsed
            .pointer("/error/details")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|detail| detail.get("retryDelay").and_then(Value::as_str))
            .find_map(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
            .map(|secs| secs.ceil() as u32)
            .unwrap_or(30)
    }

    /// Exponential backoff (1s, 2s, 4s, ...) capped at `MAX_BACKOFF_SECS`.
    fn backoff(retry_count: u32) -> Duration {
        let secs = 1u64
            .checked_shl(retry_count)
            .unwrap_or(MAX_BACKOFF_SECS)
            .min(MAX_BACKOFF_SECS);
        Duration::from_secs(secs)
    }

    async fn parse_response(response: Response) -> Result<DraftGameConfig, GenerationError> {
        let response = Self::handle_response_status(response).await?;
        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        let text = body.first_text().ok_or(GenerationError::EmptyResponse)?;
        serde_json::from_str(text)
            .map_err(|e| GenerationError::parse(format!("Model returned invalid JSON: {}", e)))
    }
}

#[async_trait]
impl ContentGenerator for GeminiContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<DraftGameConfig, GenerationError> {
        let body = Self::to_gemini_request(request);
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&body).await {
                Ok(response) => Self::parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(draft) => return Ok(draft),
                Err(err) => {
                    if err.is_quota()
                        || !err.is_retryable()
                        || retry_count >= self.config.max_retries
                    {
                        return Err(err);
                    }
                    tracing::warn!(error = %err, attempt = retry_count + 1, "gemini request failed, retrying");
                }
            }

            sleep(Self::backoff(retry_count)).await;
            retry_count += 1;
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini API wire types.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .map(|p| p.text.as_str())
            .find(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::personalization::{
        DecisionOptions, DecisionTree, FixedPicker, UserMetrics,
    };

    fn request() -> GenerationRequest {
        let metrics = UserMetrics::default();
        let outcome =
            DecisionTree::evaluate(&metrics, &DecisionOptions::default(), &mut FixedPicker(0));
        GenerationRequest {
            metrics,
            outcome,
            recent_types: vec![],
            has_image: false,
            requested_at: Timestamp::now(),
        }
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(3);

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.api_key(), "test-key");

        let generator = GeminiContentGenerator::new(config, Client::new());
        assert_eq!(
            generator.generate_url(),
            "https://custom.api.com/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let config = GeminiConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn request_uses_json_mode_and_schema() {
        let body = serde_json::to_value(GeminiContentGenerator::to_gemini_request(&request()))
            .unwrap();

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"][0],
            "gameType"
        );
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("DECISION TREE"));
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            GeminiContentGenerator::classify_failure(429, "{}"),
            GenerationError::rate_limited(30)
        );
        assert!(GeminiContentGenerator::classify_failure(
            429,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded"}}"#
        )
        .is_quota());
        assert!(matches!(
            GeminiContentGenerator::classify_failure(403, "You exceeded your current quota"),
            GenerationError::QuotaExceeded { .. }
        ));
        assert_eq!(
            GeminiContentGenerator::classify_failure(403, "API key not valid"),
            GenerationError::AuthenticationFailed
        );
        assert!(matches!(
            GeminiContentGenerator::classify_failure(503, "overloaded"),
            GenerationError::Unavailable { .. }
        ));
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(GeminiContentGenerator::backoff(0), Duration::from_secs(1));
        assert_eq!(GeminiContentGenerator::backoff(3), Duration::from_secs(8));
        assert_eq!(GeminiContentGenerator::backoff(4), Duration::from_secs(16));
        assert_eq!(GeminiContentGenerator::backoff(10), Duration::from_secs(16));
        assert_eq!(GeminiContentGenerator::backoff(64), Duration::from_secs(16));
    }

    #[test]
    fn retry_delay_is_parsed_from_details() {
        let body = r#"{"error":{"details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"17.2s"}]}}"#;
        assert_eq!(GeminiContentGenerator::parse_retry_after(body), 18);
        assert_eq!(GeminiContentGenerator::parse_retry_after("not json"), 30);
    }

    #[test]
    fn response_text_extraction_skips_empty_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":""},{"text":"{\"gameType\":\"trivia\"}"}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("{\"gameType\":\"trivia\"}"));

        let empty: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.first_text(), None);
    }
}
