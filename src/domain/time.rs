//! Time domain types
//!
//! Timestamps are carried as milliseconds since the Unix epoch so that
//! evaluation can be replayed deterministically with an explicit `now`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Minutes in one day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Point in time, milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from epoch milliseconds
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        Self(millis)
    }

    /// Epoch milliseconds
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Shift by a signed number of seconds, saturating at the ends of time
    pub const fn plus_seconds(&self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds.saturating_mul(1000)))
    }

    /// Shift by a signed number of minutes, saturating
    pub const fn minus_minutes(&self, minutes: i64) -> Self {
        Self(self.0.saturating_sub(minutes.saturating_mul(60_000)))
    }

    /// Shift by a signed number of hours, saturating
    pub const fn minus_hours(&self, hours: i64) -> Self {
        Self(self.0.saturating_sub(hours.saturating_mul(3_600_000)))
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is later)
    ///
    /// Saturates instead of overflowing for timestamps at the ends of the
    /// `i64` range.
    #[inline]
    pub const fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole minutes elapsed since `earlier`, truncated toward zero
    pub const fn minutes_since(&self, earlier: Timestamp) -> i64 {
        self.millis_since(earlier) / 60_000
    }

    /// Local minute of the day (0-1439) for this instant
    pub fn local_minute_of_day(&self) -> u16 {
        use chrono::{Local, TimeZone, Timelike};

        match Local.timestamp_millis_opt(self.0).single() {
            Some(dt) => (dt.hour() * 60 + dt.minute()) as u16,
            None => 0,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self::from_millis(millis)
    }
}
