//! NewsSource port - Interface for headline providers.

use async_trait::async_trait;

use crate::domain::signals::Headline;

use super::SourceError;

/// One feed a news source offers, fetched independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsFeed {
    /// Category label the headlines are filed under.
    pub category: &'static str,
    /// Most headlines to request.
    pub limit: usize,
}

impl NewsFeed {
    pub const fn new(category: &'static str, limit: usize) -> Self {
        Self { category, limit }
    }
}

/// Port for fetching current headlines.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Feeds this source serves, in the order they should be reported.
    fn feeds(&self) -> Vec<NewsFeed>;

    /// Fetches up to `feed.limit` headlines for one feed.
    async fn fetch_headlines(&self, feed: NewsFeed) -> Result<Vec<Headline>, SourceError>;
}
