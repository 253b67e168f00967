//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresHistoryStore` - Delivered experiences in `game_sessions`

mod history_store;

pub use history_store::PostgresHistoryStore;
