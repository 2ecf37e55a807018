use crate::fetcher::FeedFetcher;
use crate::traits::{FeedEntry, FeedSource};
use crate::types::{NotifierError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Live RSS/Atom feed source for a single pass conditions URL.
pub struct RssFeedSource {
    url: String,
    fetcher: FeedFetcher,
}

impl RssFeedSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let fetcher = FeedFetcher::new(timeout)?;
        Ok(Self { url, fetcher })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_name(&self) -> String {
        self.url.clone()
    }

    async fn latest_entry(&self) -> Result<FeedEntry> {
        let content = self.fetcher.fetch(&self.url).await?;
        let feed = feed_rs::parser::parse(content.as_bytes())
            .map_err(|e| NotifierError::Feed(format!("failed to parse feed: {e}")))?;

        let entry = feed
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| NotifierError::Feed("feed contains no entries".to_string()))?;

        debug!("latest feed entry id {}", entry.id);
        let summary = entry.summary.map(|s| s.content).unwrap_or_default();
        Ok(FeedEntry {
            id: entry.id,
            summary,
        })
    }
}
