//! Alert kind registry
//!
//! The closed set of alert kinds and their static metadata. Every lookup is a
//! total function of the variant.

use crate::domain::{TransmitterType, DEFAULT_BATTERY_ALERT_LEVEL};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of alert the engine can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Glucose below the low threshold
    Low,
    /// Glucose above the high threshold
    High,
    /// Glucose below the very-low threshold
    VeryLow,
    /// Glucose above the very-high threshold
    VeryHigh,
    /// No reading received for too long
    MissedReading,
    /// Last calibration is too old
    Calibration,
    /// Transmitter battery below the configured floor
    BatteryLow,
}

impl AlertKind {
    /// All kinds, in evaluation order
    pub const ALL: [AlertKind; 7] = [
        Self::Low,
        Self::High,
        Self::VeryLow,
        Self::VeryHigh,
        Self::MissedReading,
        Self::Calibration,
        Self::BatteryLow,
    ];

    /// Whether entries of this kind carry a value
    pub fn needs_value(&self) -> bool {
        match self {
            Self::Low
            | Self::High
            | Self::VeryLow
            | Self::VeryHigh
            | Self::MissedReading
            | Self::Calibration
            | Self::BatteryLow => true,
        }
    }

    /// Value seeded into a brand-new entry of this kind
    ///
    /// Glucose thresholds are mg/dL, missed reading is minutes, calibration
    /// is hours. The battery-low default depends on the transmitter model.
    pub fn default_value(&self, transmitter: Option<TransmitterType>) -> i32 {
        match self {
            Self::Low => 70,
            Self::High => 170,
            Self::VeryLow => 50,
            Self::VeryHigh => 250,
            Self::MissedReading => 30,
            Self::Calibration => 24,
            Self::BatteryLow => transmitter
                .map(|t| t.default_battery_alert_level())
                .unwrap_or(DEFAULT_BATTERY_ALERT_LEVEL),
        }
    }

    /// Short label used in log lines
    pub fn logging_label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::VeryLow => "verylow",
            Self::VeryHigh => "veryhigh",
            Self::MissedReading => "missedreading",
            Self::Calibration => "calibration",
            Self::BatteryLow => "batterylow",
        }
    }

    /// Identifier of the notification channel, one per kind
    ///
    /// A new notification on a channel replaces the pending one.
    pub fn notification_channel_id(&self) -> &'static str {
        match self {
            Self::Low => "lowAlert",
            Self::High => "highAlert",
            Self::VeryLow => "veryLowAlert",
            Self::VeryHigh => "veryHighAlert",
            Self::MissedReading => "missedReadingAlert",
            Self::Calibration => "calibrationRequest",
            Self::BatteryLow => "batteryLowAlert",
        }
    }

    /// Title for selecting this kind in a settings list
    pub fn picker_title(&self) -> &'static str {
        match self {
            Self::Low => "Low Alert",
            Self::High => "High Alert",
            Self::VeryLow => "Very Low Alert",
            Self::VeryHigh => "Very High Alert",
            Self::MissedReading => "Missed Reading Alert",
            Self::Calibration => "Calibration Alert",
            Self::BatteryLow => "Transmitter Battery Low Alert",
        }
    }

    /// Title of the notification raised for this kind
    pub fn alert_title(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
            Self::VeryLow => "Very Low",
            Self::VeryHigh => "Very High",
            Self::MissedReading => "Missed Reading",
            Self::Calibration => "Calibration Needed",
            Self::BatteryLow => "Transmitter Battery Low",
        }
    }

    /// Unit of the entry value
    pub fn value_unit(&self) -> &'static str {
        match self {
            Self::Low | Self::High | Self::VeryLow | Self::VeryHigh => "mg/dL",
            Self::MissedReading => "minutes",
            Self::Calibration => "hours",
            Self::BatteryLow => "level",
        }
    }

    /// Whether this kind compares a glucose reading against a threshold
    pub fn is_glucose_threshold(&self) -> bool {
        matches!(
            self,
            Self::Low | Self::High | Self::VeryLow | Self::VeryHigh
        )
    }

    /// Config name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::VeryLow => "very_low",
            Self::VeryHigh => "very_high",
            Self::MissedReading => "missed_reading",
            Self::Calibration => "calibration",
            Self::BatteryLow => "battery_low",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AlertKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| DomainError::UnknownKind(s.to_string()))
    }
}
