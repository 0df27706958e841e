//! Sensor calibration events

use crate::domain::Timestamp;
use serde::{Deserialize, Serialize};

/// A calibration entered for the active sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// When the calibration was made
    pub timestamp: Timestamp,
    /// Reference blood glucose in mg/dL
    #[serde(default)]
    pub value: f64,
}

impl Calibration {
    /// Create a new calibration
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Absolute distance to `now` in whole seconds
    pub fn age_seconds(&self, now: Timestamp) -> i64 {
        now.millis_since(self.timestamp).saturating_abs() / 1000
    }
}
