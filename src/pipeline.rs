use crate::differ::PassDiffer;
use crate::history::FetchHistory;
use crate::notifier::MultiNotifier;
use crate::types::{PassRecord, Result};
use std::time::Duration;
use tracing::{debug, error, info};

/// Fixed sender label shown by the notification clients.
const SENDER_NICK: &str = "wsdot";

/// Drives the fetch -> dedup -> diff -> notify cycle on a fixed interval.
/// A failed cycle is logged and the loop keeps going; nothing short of
/// process shutdown stops it.
pub struct PassPoller {
    history: FetchHistory,
    differ: PassDiffer,
    notifier: MultiNotifier,
    pass_name: String,
    poll_interval: Duration,
}

impl PassPoller {
    pub fn new(
        history: FetchHistory,
        differ: PassDiffer,
        notifier: MultiNotifier,
        pass_name: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            history,
            differ,
            notifier,
            pass_name,
            poll_interval,
        }
    }

    pub async fn run(&mut self) {
        info!(
            "starting pass polling for {} ({} recipient(s))",
            self.pass_name,
            self.notifier.recipient_count()
        );
        loop {
            if let Err(e) = self.cycle().await {
                error!("poll cycle failed: {}", e);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One fetch cycle. Public so tests can drive the pipeline without
    /// the timer.
    pub async fn cycle(&mut self) -> Result<()> {
        let record = match self.history.get().await? {
            Some(record) => record,
            None => return Ok(()),
        };

        debug!("new feed entry, checking for a reportable change");
        if !self.differ.check(&record) {
            return Ok(());
        }

        let text = format_record(&record);
        info!("new {} pass update:{}", self.pass_name, text);

        let channel = format!("#{}", self.pass_name);
        self.notifier.send(&text, &channel, SENDER_NICK).await;
        info!("notification fan-out complete");
        Ok(())
    }
}

/// Renders a record as the multi-line notification body. The leading
/// blank line is part of the existing wire convention.
pub fn format_record(record: &PassRecord) -> String {
    let lines: Vec<String> = record
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    format!("\n{}", lines.join("\n"))
}
