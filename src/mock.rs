//! Mock implementations for testing
//!
//! Provides a formatter that echoes its inputs, an in-memory snapshot source
//! and small builders for entries and readings.

use crate::alerts::{AlertEntry, AlertKind, AlertType};
use crate::display::ReadingFormatter;
use crate::domain::{BgReading, Timestamp};
use crate::error::SourceError;
use crate::source::{Snapshot, SnapshotSource};

use std::collections::VecDeque;
use std::sync::Mutex;

/// Fixed evaluation time used across tests (2023-11-14T22:13:20Z)
pub const NOW: Timestamp = Timestamp::from_millis(1_700_000_000_000);

/// Formatter that renders raw numbers in angle brackets
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoFormatter;

impl ReadingFormatter for EchoFormatter {
    fn format_value(&self, mgdl: f64) -> String {
        format!("<{}>", mgdl)
    }

    fn format_delta(&self, last: &BgReading, prior: Option<&BgReading>) -> String {
        let prior = prior
            .map(|p| p.calculated_value.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!("<delta {} from {}>", last.calculated_value, prior)
    }

    fn slope_arrow(&self, reading: &BgReading) -> String {
        format!("<arrow {}>", reading.slope)
    }
}

/// All-day entry with an enabled alert type
pub fn enabled_entry(kind: AlertKind, value: i32) -> AlertEntry {
    AlertEntry::new(kind, value, AlertType::new("Default"))
}

/// All-day entry with a disabled alert type
pub fn disabled_entry(kind: AlertKind, value: i32) -> AlertEntry {
    AlertEntry::new(kind, value, AlertType::new("Disabled").disabled())
}

/// Reading taken `minutes` before [`NOW`], trend hidden
pub fn reading_minutes_ago(minutes: i64, value: f64) -> BgReading {
    BgReading::new(NOW.minus_minutes(minutes), value)
}

/// Snapshot source serving queued results, then repeating the last snapshot
#[derive(Debug, Default)]
pub struct MockSource {
    queue: Mutex<VecDeque<Result<Snapshot, SourceError>>>,
    last: Mutex<Snapshot>,
}

impl MockSource {
    /// Source that always returns `snapshot`
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            last: Mutex::new(snapshot),
        }
    }

    /// Queue a failure for the next call
    pub fn push_error(&self, error: SourceError) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    /// Queue a snapshot for the next call
    pub fn push_snapshot(&self, snapshot: Snapshot) {
        self.queue.lock().unwrap().push_back(Ok(snapshot));
    }
}

impl SnapshotSource for MockSource {
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        match self.queue.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => {
                *self.last.lock().unwrap() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
