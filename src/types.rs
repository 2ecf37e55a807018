use crate::crypto::CryptoError;

/// Ordered key/value view of one parsed pass report.
///
/// Keys iterate in insertion order for display; inserting an existing key
/// overwrites its value in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassRecord {
    entries: Vec<(String, String)>,
}

impl PassRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; the key keeps the position of its first insertion.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Plaintext fields of one outgoing notification. Each field is obfuscated
/// per recipient before it goes on the wire.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    pub nick: String,
    pub channel: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed error: {0}")]
    Feed(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotifierError>;
