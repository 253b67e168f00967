//! Mock Content Generator for testing.
//!
//! Provides a configurable mock implementation of the ContentGenerator port.
//!
//! # Features
//!
//! - Pre-configured drafts (consumed in order)
//! - Simulated delays for timeout testing
//! - Error injection for fallback testing
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::content::{DraftGameConfig, GameConfig, GenerationRequest};
use crate::ports::{ContentGenerator, GenerationError};

/// Mock generator for testing.
///
/// When the queue is empty it echoes the engine's suggestion with default
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct MockContentGenerator {
    responses: Arc<Mutex<VecDeque<Result<DraftGameConfig, GenerationError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a draft to the queue.
    pub fn with_draft(self, draft: DraftGameConfig) -> Self {
        self.responses.lock().unwrap().push_back(Ok(draft));
        self
    }

    /// Adds a complete config to the queue.
    pub fn with_config(self, config: GameConfig) -> Self {
        self.with_draft(config.into())
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(
        &self,
        request: &GenerationRequest,
    ) -> Result<DraftGameConfig, GenerationError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(DraftGameConfig {
                    game_type: Some(request.suggested_type().as_str().to_string()),
                    reasoning: Some("Mock reasoning".to_string()),
                    config: None,
                })
            })
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<DraftGameConfig, GenerationError> {
        self.calls.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response(request)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::personalization::{
        DecisionOptions, DecisionTree, ExperienceType, FixedPicker, UserMetrics,
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

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let mut trivia = GameConfig::default_bundle();
        trivia.game_type = ExperienceType::Trivia;

        let generator = MockContentGenerator::new()
            .with_config(trivia)
            .with_error(GenerationError::rate_limited(5));

        let first = generator.generate(&request()).await.unwrap();
        assert_eq!(first.game_type.as_deref(), Some("trivia"));

        let second = generator.generate(&request()).await.unwrap_err();
        assert!(second.is_quota());
    }

    #[tokio::test]
    async fn echoes_suggestion_when_exhausted() {
        let generator = MockContentGenerator::new();
        let draft = generator.generate(&request()).await.unwrap();

        assert_eq!(draft.game_type.as_deref(), Some("obstacle_dodge"));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn records_calls() {
        let generator = MockContentGenerator::new();
        generator.generate(&request()).await.unwrap();
        generator.generate(&request()).await.unwrap();

        let calls = generator.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].suggested_type(), ExperienceType::ObstacleDodge);
    }
}
