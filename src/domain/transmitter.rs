//! Transmitter domain types
//!
//! Only the pieces the alerting core needs: the configured transmitter model
//! (which drives the battery-low default) and the reported battery level.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Battery-low threshold used when no transmitter type is configured
pub const DEFAULT_BATTERY_ALERT_LEVEL: i32 = 20;

/// Battery level as reported by the transmitter
///
/// Most transmitters report a percentage (0-100). Dexcom transmitters report
/// a voltage-derived value in the hundreds, so the range is not capped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatteryLevel(u32);

impl BatteryLevel {
    /// Create a new battery level
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Get the raw level
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BatteryLevel {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Supported CGM transmitter models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmitterType {
    DexcomG4,
    DexcomG5,
    DexcomG6,
    MiaoMiao,
    Bubble,
    Blucon,
    BlueReader,
    Droplet,
    GnsEntry,
    Watlaa,
    Libre2,
}

impl TransmitterType {
    /// All transmitter types
    pub const ALL: [TransmitterType; 11] = [
        Self::DexcomG4,
        Self::DexcomG5,
        Self::DexcomG6,
        Self::MiaoMiao,
        Self::Bubble,
        Self::Blucon,
        Self::BlueReader,
        Self::Droplet,
        Self::GnsEntry,
        Self::Watlaa,
        Self::Libre2,
    ];

    /// Default battery-low threshold for this model
    pub fn default_battery_alert_level(&self) -> i32 {
        match self {
            Self::DexcomG4 => 210,
            Self::DexcomG5 | Self::DexcomG6 => 300,
            Self::MiaoMiao
            | Self::Bubble
            | Self::Blucon
            | Self::BlueReader
            | Self::Droplet
            | Self::GnsEntry
            | Self::Watlaa
            | Self::Libre2 => DEFAULT_BATTERY_ALERT_LEVEL,
        }
    }

    /// Config name of the model
    pub fn name(&self) -> &'static str {
        match self {
            Self::DexcomG4 => "dexcom_g4",
            Self::DexcomG5 => "dexcom_g5",
            Self::DexcomG6 => "dexcom_g6",
            Self::MiaoMiao => "miao_miao",
            Self::Bubble => "bubble",
            Self::Blucon => "blucon",
            Self::BlueReader => "blue_reader",
            Self::Droplet => "droplet",
            Self::GnsEntry => "gns_entry",
            Self::Watlaa => "watlaa",
            Self::Libre2 => "libre2",
        }
    }
}

impl fmt::Display for TransmitterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TransmitterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| DomainError::UnknownTransmitter(s.to_string()))
    }
}
