use anyhow::{Context, Result};
use clap::Parser;
use pass_notifier::config::PollerConfig;
use pass_notifier::differ::PassDiffer;
use pass_notifier::history::FetchHistory;
use pass_notifier::notifier::{IrssiEndpoint, MultiNotifier};
use pass_notifier::pipeline::PassPoller;
use pass_notifier::sources::RssFeedSource;
use pass_notifier::traits::NotificationSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Polls a WSDOT pass conditions feed and pushes updates to
/// IrssiNotifier recipients.
#[derive(Parser, Debug)]
#[command(name = "pass-notifier", version, about)]
struct Args {
    /// Path to the TOML configuration file
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("loading poller config from {}", args.config.display());
    let config = PollerConfig::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    info!(
        "config loaded: polling {} every {}s for {} recipient(s)",
        config.feed_url,
        config.poll_interval_secs,
        config.recipients.len()
    );

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let source = RssFeedSource::new(config.feed_url.clone(), timeout)?;
    let history = FetchHistory::new(Box::new(source));
    let differ = PassDiffer::new(config.watched_fields.clone(), config.initial_diff);

    let mut sinks: Vec<Arc<dyn NotificationSink>> = Vec::new();
    for recipient in &config.recipients {
        sinks.push(Arc::new(IrssiEndpoint::new(recipient.clone(), timeout)?));
    }
    let notifier = MultiNotifier::new(sinks);

    let mut poller = PassPoller::new(
        history,
        differ,
        notifier,
        config.pass_name.clone(),
        Duration::from_secs(config.poll_interval_secs),
    );

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping poller");
        }
    }
    Ok(())
}
