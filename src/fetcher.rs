use crate::types::{NotifierError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("pass-notifier/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for the feed document.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("fetching feed document from {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Feed(format!(
                "feed request returned HTTP {status}"
            )));
        }
        let body = response.text().await?;
        debug!("fetched {} bytes", body.len());
        Ok(body)
    }
}
