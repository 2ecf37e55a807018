//! Test doubles for the poller pipeline: scripted feed sources and
//! recording/failing notification sinks.
#![allow(dead_code)]

use async_trait::async_trait;
use pass_notifier::traits::{FeedEntry, FeedSource, NotificationSink};
use pass_notifier::types::{NotificationPayload, NotifierError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Feed source that replays a scripted sequence of fetch outcomes. Once
/// the script is exhausted the last step repeats forever, mimicking a
/// feed that stopped updating.
pub struct ScriptedFeed {
    steps: Vec<std::result::Result<FeedEntry, String>>,
    cursor: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new(steps: Vec<std::result::Result<FeedEntry, String>>) -> Self {
        assert!(!steps.is_empty(), "scripted feed needs at least one step");
        Self {
            steps,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn entry(id: &str, summary: &str) -> std::result::Result<FeedEntry, String> {
        Ok(FeedEntry {
            id: id.to_string(),
            summary: summary.to_string(),
        })
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    fn source_name(&self) -> String {
        "scripted feed".to_string()
    }

    async fn latest_entry(&self) -> Result<FeedEntry> {
        let i = self
            .cursor
            .fetch_add(1, Ordering::SeqCst)
            .min(self.steps.len() - 1);
        match &self.steps[i] {
            Ok(entry) => Ok(entry.clone()),
            Err(msg) => Err(NotifierError::Feed(msg.clone())),
        }
    }
}

/// Sink that records every payload it is asked to deliver.
pub struct RecordingSink {
    name: String,
    pub calls: Arc<Mutex<Vec<NotificationPayload>>>,
}

impl RecordingSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn sink_name(&self) -> String {
        self.name.clone()
    }

    async fn notify(&self, payload: &NotificationPayload) -> Result<()> {
        self.calls.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Sink that always fails delivery.
pub struct FailingSink {
    name: String,
}

impl FailingSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    fn sink_name(&self) -> String {
        self.name.clone()
    }

    async fn notify(&self, _payload: &NotificationPayload) -> Result<()> {
        Err(NotifierError::Delivery(format!(
            "{} is unreachable",
            self.name
        )))
    }
}
