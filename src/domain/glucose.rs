//! Glucose domain types
//!
//! Readings are always stored in mg/dL; the display unit is a user preference
//! applied only when rendering text.

use crate::domain::Timestamp;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Factor converting mg/dL to mmol/L
pub const MGDL_TO_MMOL: f64 = 0.0555;

/// Calculated value marking a reading that carries no real measurement
pub const INVALID_READING_VALUE: f64 = 0.0;

/// User's preferred display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseUnit {
    /// Milligrams per deciliter
    #[default]
    MgDl,
    /// Millimoles per liter
    #[serde(rename = "mmol")]
    MmolL,
}

impl GlucoseUnit {
    /// Unit label as shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Self::MgDl => "mg/dL",
            Self::MmolL => "mmol/L",
        }
    }

    /// Convert a mg/dL value into this unit
    pub fn convert_mgdl(self, mgdl: f64) -> f64 {
        match self {
            Self::MgDl => mgdl,
            Self::MmolL => mgdl * MGDL_TO_MMOL,
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GlucoseUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mgdl" | "mg/dl" => Ok(Self::MgDl),
            "mmol" | "mmol/l" => Ok(Self::MmolL),
            _ => Err(DomainError::UnknownUnit(s.to_string())),
        }
    }
}

/// A glucose measurement from the active sensor
///
/// A reading deserialized without a `slope` hides its trend arrow unless
/// `hide_slope` says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBgReading")]
pub struct BgReading {
    /// When the reading was taken
    pub timestamp: Timestamp,
    /// Calculated glucose value in mg/dL, 0.0 when invalid
    pub calculated_value: f64,
    /// Rate of change in mg/dL per minute
    pub slope: f64,
    /// Whether the trend arrow must not be shown
    pub hide_slope: bool,
}

#[derive(Deserialize)]
struct RawBgReading {
    timestamp: Timestamp,
    calculated_value: f64,
    slope: Option<f64>,
    hide_slope: Option<bool>,
}

impl From<RawBgReading> for BgReading {
    fn from(raw: RawBgReading) -> Self {
        Self {
            timestamp: raw.timestamp,
            calculated_value: raw.calculated_value,
            hide_slope: raw.hide_slope.unwrap_or(raw.slope.is_none()),
            slope: raw.slope.unwrap_or_default(),
        }
    }
}

impl BgReading {
    /// Create a reading without trend information
    pub fn new(timestamp: Timestamp, calculated_value: f64) -> Self {
        Self {
            timestamp,
            calculated_value,
            slope: 0.0,
            hide_slope: true,
        }
    }

    /// Builder: set slope (mg/dL per minute) and show the trend arrow
    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self.hide_slope = false;
        self
    }

    /// Whether this reading holds a real measurement
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.calculated_value != INVALID_READING_VALUE
    }
}
