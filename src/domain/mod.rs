//! Domain models for glucalert
//!
//! Inputs the alert engine reads: glucose readings, calibrations, transmitter
//! battery level and time.

pub mod calibration;
pub mod glucose;
pub mod time;
pub mod transmitter;

pub use calibration::Calibration;
pub use glucose::{BgReading, GlucoseUnit, INVALID_READING_VALUE, MGDL_TO_MMOL};
pub use time::{Timestamp, MINUTES_PER_DAY};
pub use transmitter::{BatteryLevel, TransmitterType, DEFAULT_BATTERY_ALERT_LEVEL};
