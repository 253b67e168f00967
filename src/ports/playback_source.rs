//! PlaybackSource port - Interface for the user's live music playback.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::personalization::SpotifyMetrics;

use super::SourceError;

#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// What the user is playing right now, or `None` when nothing is.
    ///
    /// `access_token` is the user's own OAuth token and is never logged.
    async fn fetch_playback(
        &self,
        access_token: &SecretString,
    ) -> Result<Option<SpotifyMetrics>, SourceError>;
}
