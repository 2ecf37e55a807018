pub mod config;
pub mod crypto;
pub mod differ;
pub mod fetcher;
pub mod history;
pub mod notifier;
pub mod parser;
pub mod pipeline;
pub mod sources;
pub mod traits;
pub mod types;

pub use config::{PollerConfig, RecipientConfig};
pub use differ::PassDiffer;
pub use fetcher::FeedFetcher;
pub use history::FetchHistory;
pub use notifier::{IrssiEndpoint, MultiNotifier};
pub use parser::parse_pass_summary;
pub use pipeline::{format_record, PassPoller};
pub use sources::RssFeedSource;
pub use traits::{FeedEntry, FeedSource, NotificationSink};
pub use types::{NotificationPayload, NotifierError, PassRecord, Result};
