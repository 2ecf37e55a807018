use crate::config::RecipientConfig;
use crate::crypto;
use crate::traits::NotificationSink;
use crate::types::{NotificationPayload, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Protocol version expected by the notification API.
const PROTOCOL_VERSION: u32 = 13;

/// One IrssiNotifier recipient: obfuscates payload fields with the
/// recipient's secret and posts them to its API endpoint.
pub struct IrssiEndpoint {
    api_token: String,
    secret: String,
    api_url: String,
    client: Client,
}

impl IrssiEndpoint {
    pub fn new(recipient: RecipientConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_token: recipient.api_token,
            secret: recipient.secret,
            api_url: recipient.api_url,
            client,
        })
    }
}

#[async_trait]
impl NotificationSink for IrssiEndpoint {
    fn sink_name(&self) -> String {
        // enough of the token to tell recipients apart in logs
        let prefix: String = self.api_token.chars().take(6).collect();
        format!("irssi:{prefix}…")
    }

    async fn notify(&self, payload: &NotificationPayload) -> Result<()> {
        let form = [
            ("apiToken", self.api_token.clone()),
            ("nick", crypto::obfuscate(&self.secret, &payload.nick)?),
            ("channel", crypto::obfuscate(&self.secret, &payload.channel)?),
            ("message", crypto::obfuscate(&self.secret, &payload.message)?),
            ("version", PROTOCOL_VERSION.to_string()),
        ];

        info!("sending message to {}", self.sink_name());
        let response = self.client.post(&self.api_url).form(&form).send().await?;
        info!("message sent: {}", response.status());
        Ok(())
    }
}

/// Best-effort concurrent broadcast to every configured sink.
pub struct MultiNotifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl MultiNotifier {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn recipient_count(&self) -> usize {
        self.sinks.len()
    }

    /// Dispatches one notification to every sink concurrently and waits
    /// for all dispatches to finish. A failing sink is logged and never
    /// blocks or fails its siblings; the broadcast itself cannot fail.
    pub async fn send(&self, message: &str, channel: &str, nick: &str) {
        let payload = Arc::new(NotificationPayload {
            nick: nick.to_string(),
            channel: channel.to_string(),
            message: message.to_string(),
        });

        let tasks: Vec<_> = self
            .sinks
            .iter()
            .cloned()
            .map(|sink| {
                let payload = Arc::clone(&payload);
                tokio::spawn(async move {
                    if let Err(e) = sink.notify(&payload).await {
                        warn!("delivery to {} failed: {}", sink.sink_name(), e);
                    }
                })
            })
            .collect();

        for joined in join_all(tasks).await {
            if let Err(e) = joined {
                error!("notification task panicked: {}", e);
            }
        }
    }
}
