use crate::parser::parse_pass_summary;
use crate::traits::FeedSource;
use crate::types::{PassRecord, Result};
use std::collections::HashSet;
use tracing::debug;

/// Wraps a [`FeedSource`] and filters out entries that were already
/// observed. Seen entry ids accumulate for the process lifetime; an id
/// that was delivered once is never delivered again.
pub struct FetchHistory {
    source: Box<dyn FeedSource>,
    seen: HashSet<String>,
}

impl FetchHistory {
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        Self {
            source,
            seen: HashSet::new(),
        }
    }

    /// Fetches the most recent feed entry and returns its parsed record,
    /// or `None` if the entry was seen before. Fetch errors propagate and
    /// leave the history untouched.
    pub async fn get(&mut self) -> Result<Option<PassRecord>> {
        let entry = self.source.latest_entry().await?;
        if self.seen.contains(&entry.id) {
            return Ok(None);
        }
        debug!("recording entry id {} in history", entry.id);
        self.seen.insert(entry.id);
        Ok(Some(parse_pass_summary(&entry.summary)))
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
