use crate::types::{NotificationPayload, Result};
use async_trait::async_trait;

/// One discrete, identifiable update from the remote conditions feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub id: String,
    pub summary: String,
}

/// Source of pass report entries (the live RSS feed in production, mocks
/// in tests).
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name for log lines.
    fn source_name(&self) -> String;

    /// Fetch the single most recent entry from the feed.
    async fn latest_entry(&self) -> Result<FeedEntry>;
}

/// One configured notification destination.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn sink_name(&self) -> String;

    async fn notify(&self, payload: &NotificationPayload) -> Result<()>;
}
