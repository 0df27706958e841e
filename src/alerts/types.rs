//! Alert configuration domain types
//!
//! Defines alert types, per-kind entries and the time-of-day schedule that
//! decides which entry applies at a given minute.

use super::kind::AlertKind;
use crate::domain::MINUTES_PER_DAY;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// How an alert is presented once it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertType {
    /// Unique name, referenced by entries
    pub name: String,
    /// Whether alerts bound to this type fire at all
    pub enabled: bool,
    /// Vibrate when delivered
    #[serde(default)]
    pub vibrate: bool,
    /// Sound to play, platform default when absent
    #[serde(default)]
    pub sound: Option<String>,
}

impl AlertType {
    /// Create an enabled alert type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            vibrate: true,
            sound: None,
        }
    }

    /// Builder: disable the type
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Builder: set sound
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }
}

/// Configuration of one alert kind for one part of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Kind this entry configures
    pub kind: AlertKind,
    /// Minute of the day (0-1439) from which the entry applies
    pub start: u16,
    /// Threshold, meaning depends on the kind (see [`AlertKind::value_unit`])
    ///
    /// Glucose thresholds are always mg/dL, whatever unit alerts are shown in.
    pub value: i32,
    /// Presentation and enable flag
    pub alert_type: AlertType,
}

impl AlertEntry {
    /// Create an entry starting at midnight
    pub fn new(kind: AlertKind, value: i32, alert_type: AlertType) -> Self {
        Self {
            kind,
            start: 0,
            value,
            alert_type,
        }
    }

    /// Builder: set start minute
    pub fn starting_at(mut self, start: u16) -> Self {
        self.start = start;
        self
    }

    /// Whether this entry's alert type is enabled
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.alert_type.enabled
    }
}

/// Ordered entries for one alert kind covering a whole day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSchedule {
    kind: AlertKind,
    entries: Vec<AlertEntry>,
}

impl AlertSchedule {
    /// Create a schedule, validating the entries
    ///
    /// Entries are sorted by start. The first must start at minute 0 and
    /// starts must be unique and inside the day.
    pub fn new(kind: AlertKind, mut entries: Vec<AlertEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::EmptySchedule(kind));
        }

        for entry in &entries {
            if entry.kind != kind {
                return Err(DomainError::KindMismatch {
                    expected: kind,
                    found: entry.kind,
                });
            }
            if entry.start >= MINUTES_PER_DAY {
                return Err(DomainError::InvalidStart(entry.start));
            }
        }

        entries.sort_by_key(|e| e.start);

        if entries[0].start != 0 {
            return Err(DomainError::FirstEntryNotAtMidnight {
                kind,
                start: entries[0].start,
            });
        }

        for pair in entries.windows(2) {
            if pair[0].start >= pair[1].start {
                return Err(DomainError::UnsortedSchedule {
                    kind,
                    previous: pair[0].start,
                    start: pair[1].start,
                });
            }
        }

        Ok(Self { kind, entries })
    }

    /// Schedule with a single all-day entry
    pub fn single(entry: AlertEntry) -> Result<Self, DomainError> {
        Self::new(entry.kind, vec![entry])
    }

    /// Kind covered by this schedule
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// Entries ordered by start
    pub fn entries(&self) -> &[AlertEntry] {
        &self.entries
    }

    /// Entry applying at `minute_of_day` and the one after it
    ///
    /// The next entry wraps around to the first entry of the day. It is
    /// `None` when the schedule has a single entry.
    pub fn current_and_next(&self, minute_of_day: u16) -> (&AlertEntry, Option<&AlertEntry>) {
        let minute = minute_of_day.min(MINUTES_PER_DAY - 1);
        let index = self
            .entries
            .iter()
            .rposition(|e| e.start <= minute)
            .unwrap_or(0);

        let next = if self.entries.len() > 1 {
            self.entries.get((index + 1) % self.entries.len())
        } else {
            None
        };

        (&self.entries[index], next)
    }
}
