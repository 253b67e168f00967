//! HistoryStore port - Interface for the per-user record of past experiences.
//!
//! The engine only needs the most recent types; full entries are kept so a
//! session can be replayed later.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::content::GameConfig;
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::personalization::ExperienceType;

/// One delivered experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub game: GameConfig,
    pub created_at: Timestamp,
}

impl HistoryEntry {
    pub fn new(user_id: UserId, game: GameConfig) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            game,
            created_at: Timestamp::now(),
        }
    }

    pub fn game_type(&self) -> ExperienceType {
        self.game.game_type
    }
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Up to `limit` types most recently delivered to `user_id`, newest first.
    async fn recent_types(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ExperienceType>, HistoryError>;

    async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored row holds a type this build does not know.
    #[error("corrupt history row: {0}")]
    Corrupt(String),
}

impl HistoryError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}
