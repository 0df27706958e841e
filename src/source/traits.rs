//! Snapshot type and source trait

use crate::domain::{BatteryLevel, BgReading, Calibration, Timestamp};
use crate::error::SourceError;
use serde::{Deserialize, Serialize};

/// Everything the alert engine needs at one evaluation tick
///
/// Readings and calibrations must all belong to the active sensor; with no
/// active sensor both lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Evaluation time, wall clock when absent
    #[serde(default)]
    pub now: Option<Timestamp>,
    /// Readings of the active sensor, any order
    #[serde(default)]
    pub readings: Vec<BgReading>,
    /// Calibrations of the active sensor, any order
    #[serde(default)]
    pub calibrations: Vec<Calibration>,
    /// Latest transmitter battery level
    #[serde(default)]
    pub battery_level: Option<BatteryLevel>,
}

impl Snapshot {
    /// Evaluation time, falling back to the current wall clock
    pub fn now_or_current(&self) -> Timestamp {
        self.now.unwrap_or_else(Timestamp::now)
    }

    /// Readings with a real value, newest first
    pub fn valid_readings(&self) -> Vec<&BgReading> {
        let mut readings: Vec<_> = self.readings.iter().filter(|r| r.is_valid()).collect();
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        readings
    }

    /// Newest calibration
    pub fn last_calibration(&self) -> Option<&Calibration> {
        self.calibrations.iter().max_by_key(|c| c.timestamp)
    }
}

/// Trait for anything that can provide snapshots
///
/// Production reads a JSON file; tests use an in-memory mock.
pub trait SnapshotSource {
    /// Read the latest snapshot
    fn snapshot(&self) -> Result<Snapshot, SourceError>;

    /// Human-readable description of the source
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_readings_newest_first() {
        let snapshot = Snapshot {
            readings: vec![
                BgReading::new(Timestamp::from_millis(1_000), 100.0),
                BgReading::new(Timestamp::from_millis(3_000), 0.0),
                BgReading::new(Timestamp::from_millis(2_000), 110.0),
            ],
            ..Snapshot::default()
        };

        let values: Vec<_> = snapshot
            .valid_readings()
            .iter()
            .map(|r| r.calculated_value)
            .collect();
        assert_eq!(values, vec![110.0, 100.0]);
    }

    #[test]
    fn test_last_calibration() {
        let snapshot = Snapshot {
            calibrations: vec![
                Calibration::new(Timestamp::from_millis(5_000), 120.0),
                Calibration::new(Timestamp::from_millis(9_000), 95.0),
            ],
            ..Snapshot::default()
        };
        assert_eq!(snapshot.last_calibration().map(|c| c.value), Some(95.0));
        assert!(Snapshot::default().last_calibration().is_none());
    }

    #[test]
    fn test_explicit_now_wins() {
        let snapshot = Snapshot {
            now: Some(Timestamp::from_millis(42)),
            ..Snapshot::default()
        };
        assert_eq!(snapshot.now_or_current(), Timestamp::from_millis(42));
    }

    #[test]
    fn test_deserialize_minimal() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.readings.is_empty());
        assert!(snapshot.battery_level.is_none());
    }
}
