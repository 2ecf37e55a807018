use crate::types::{NotifierError, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://irssinotifier.appspot.com/API/Message";

#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// RSS/Atom feed to poll for pass reports.
    pub feed_url: String,
    /// Display name of the watched pass; also names the notification channel.
    pub pass_name: String,
    pub poll_interval_secs: u64,
    /// Whether the very first observation counts as an update.
    #[serde(default)]
    pub initial_diff: bool,
    /// Section names whose values decide whether a report is worth sending.
    #[serde(default = "default_watched_fields")]
    pub watched_fields: Vec<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    pub recipients: Vec<RecipientConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipientConfig {
    pub api_token: String,
    /// Pre-shared secret used to obfuscate this recipient's payload fields.
    pub secret: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_watched_fields() -> Vec<String> {
    vec!["EASTBOUND".to_string(), "WESTBOUND".to_string()]
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl PollerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PollerConfig = toml::from_str(&content)
            .map_err(|e| NotifierError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_http_url(&self.feed_url, "feed_url")?;
        if self.pass_name.trim().is_empty() {
            return Err(NotifierError::Config("pass_name must not be empty".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(NotifierError::Config(
                "poll_interval_secs must be at least 1".into(),
            ));
        }
        if self.watched_fields.is_empty() {
            return Err(NotifierError::Config(
                "watched_fields must name at least one section".into(),
            ));
        }
        if self.recipients.is_empty() {
            return Err(NotifierError::Config(
                "at least one [[recipients]] entry is required".into(),
            ));
        }
        for (i, recipient) in self.recipients.iter().enumerate() {
            if recipient.api_token.is_empty() {
                return Err(NotifierError::Config(format!(
                    "recipient {i}: api_token must not be empty"
                )));
            }
            if recipient.secret.is_empty() {
                return Err(NotifierError::Config(format!(
                    "recipient {i}: secret must not be empty"
                )));
            }
            check_http_url(&recipient.api_url, "api_url")?;
        }
        Ok(())
    }
}

fn check_http_url(value: &str, field: &str) -> Result<()> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(NotifierError::Config(format!(
            "{field} must use http or https, got {}",
            url.scheme()
        ))),
        Err(e) => Err(NotifierError::Config(format!("{field} is not a URL: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"
        feed_url = "https://www.wsdot.wa.gov/traffic/rssfeeds/stevens/Default.aspx"
        pass_name = "stevens"
        poll_interval_secs = 60

        [[recipients]]
        api_token = "token-a"
        secret = "secret-a"

        [[recipients]]
        api_token = "token-b"
        secret = "secret-b"
        api_url = "http://localhost:8080/API/Message"
    "#;

    #[test]
    fn parses_and_validates() {
        let config: PollerConfig = toml::from_str(GOOD).unwrap();
        config.validate().unwrap();
        assert_eq!(config.pass_name, "stevens");
        assert_eq!(config.recipients.len(), 2);
        assert_eq!(config.recipients[0].api_url, DEFAULT_API_URL);
        assert_eq!(
            config.recipients[1].api_url,
            "http://localhost:8080/API/Message"
        );
        assert!(!config.initial_diff);
        assert_eq!(config.watched_fields, vec!["EASTBOUND", "WESTBOUND"]);
    }

    #[test]
    fn rejects_empty_recipient_list() {
        let toml = r#"
            feed_url = "https://example.com/feed"
            pass_name = "stevens"
            poll_interval_secs = 60
            recipients = []
        "#;
        let config: PollerConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_http_feed_url() {
        let toml = r#"
            feed_url = "ftp://example.com/feed"
            pass_name = "stevens"
            poll_interval_secs = 60

            [[recipients]]
            api_token = "t"
            secret = "s"
        "#;
        let config: PollerConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }
}
