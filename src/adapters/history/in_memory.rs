//! In-memory history store.
//!
//! Used when no database is configured, and by tests. Nothing survives a
//! restart; use `PostgresHistoryStore` when history must persist.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::domain::personalization::ExperienceType;
use crate::ports::{HistoryEntry, HistoryError, HistoryStore};

/// Most entries kept per user when no cap is given. Matches the largest
/// history window the engine can be configured to read.
pub const DEFAULT_ENTRIES_PER_USER: usize = 50;

/// Per-user recent history, newest first, capped per user.
///
/// Older entries fall off once a user exceeds the cap, so memory is bounded
/// by the number of users rather than the number of requests.
pub struct InMemoryHistoryStore {
    per_user: Mutex<HashMap<UserId, VecDeque<HistoryEntry>>>,
    cap: usize,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::with_cap(DEFAULT_ENTRIES_PER_USER)
    }
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `cap` entries per user (at least one).
    pub fn with_cap(cap: usize) -> Self {
        Self {
            per_user: Mutex::new(HashMap::new()),
            cap: cap.max(1),
        }
    }

    /// Seeds the store, e.g. with a play history for a test.
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        let store = Self::new();
        {
            let mut per_user = store.per_user.lock().unwrap();
            for entry in entries {
                insert_capped(&mut per_user, entry, store.cap);
            }
        }
        store
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Retained entries for one user, newest first.
    pub fn entries_for(&self, user_id: &UserId) -> Vec<HistoryEntry> {
        self.per_user
            .lock()
            .unwrap()
            .get(user_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Retained entries across all users.
    pub fn len(&self) -> usize {
        self.per_user.lock().unwrap().values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.per_user.lock().unwrap().clear();
    }
}

/// Inserts in newest-first order; on equal timestamps the later insert
/// comes first. Trims the user's list back to `cap`.
fn insert_capped(
    per_user: &mut HashMap<UserId, VecDeque<HistoryEntry>>,
    entry: HistoryEntry,
    cap: usize,
) {
    let entries = per_user.entry(entry.user_id.clone()).or_default();
    let position = entries
        .iter()
        .position(|existing| existing.created_at <= entry.created_at)
        .unwrap_or(entries.len());
    entries.insert(position, entry);
    entries.truncate(cap);
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn recent_types(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ExperienceType>, HistoryError> {
        let per_user = self.per_user.lock().unwrap();
        Ok(per_user
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .take(limit)
                    .map(HistoryEntry::game_type)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut per_user = self.per_user.lock().unwrap();
        insert_capped(&mut per_user, entry, self.cap);
        Ok(())
    }
}
