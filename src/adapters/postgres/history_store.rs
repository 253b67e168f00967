//! PostgreSQL implementation of HistoryStore.
//!
//! One row per delivered experience in `game_sessions`. The parameters are
//! stored as JSONB so they can change shape without a migration.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::UserId;
use crate::domain::personalization::ExperienceType;
use crate::ports::{HistoryEntry, HistoryError, HistoryStore};

#[derive(Clone)]
pub struct PostgresHistoryStore {
    pool: PgPool,
}

impl PostgresHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> Result<(), HistoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| HistoryError::database(format!("Failed to run migrations: {}", e)))
    }
}

#[async_trait]
impl HistoryStore for PostgresHistoryStore {
    async fn recent_types(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ExperienceType>, HistoryError> {
        let rows = sqlx::query(
            r#"
            SELECT game_type
            FROM game_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HistoryError::database(format!("Failed to fetch history: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.get("game_type");
                raw.parse::<ExperienceType>()
                    .map_err(|_| HistoryError::Corrupt(format!("unknown game type '{}'", raw)))
            })
            .collect()
    }

    async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let config = serde_json::to_value(&entry.game.config)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO game_sessions (id, user_id, game_type, reasoning, config, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.session_id.as_uuid())
        .bind(entry.user_id.as_str())
        .bind(entry.game.game_type.as_str())
        .bind(&entry.game.reasoning)
        .bind(config)
        .bind(entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::database(format!("Failed to insert game session: {}", e)))?;

        Ok(())
    }
}
