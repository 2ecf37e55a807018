use crate::types::PassRecord;
use tracing::debug;

/// Detects notification-worthy changes between successive pass reports.
///
/// A record is reduced to the values of the watched fields (in order,
/// `None` for a missing field) and compared against the previous
/// projection. The baseline is updated on every check, whether or not a
/// change was reported.
pub struct PassDiffer {
    watched: Vec<String>,
    last: Option<Vec<Option<String>>>,
    skip: bool,
}

impl PassDiffer {
    /// `initial_diff` controls whether the very first observation counts
    /// as an update.
    pub fn new(watched: Vec<String>, initial_diff: bool) -> Self {
        Self {
            watched,
            last: None,
            skip: !initial_diff,
        }
    }

    fn project(&self, record: &PassRecord) -> Vec<Option<String>> {
        self.watched
            .iter()
            .map(|key| record.get(key).map(str::to_string))
            .collect()
    }

    pub fn check(&mut self, record: &PassRecord) -> bool {
        let projection = self.project(record);
        let has_diff = self.last.as_ref() != Some(&projection) && !self.skip;

        self.skip = false;
        self.last = Some(projection);

        if has_diff {
            debug!("watched fields changed: {:?}", self.last);
        }
        has_diff
    }
}
