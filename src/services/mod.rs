//! Service layer for alert evaluation
//!
//! Services drive the alert manager from a snapshot source.

pub mod monitor;

pub use monitor::{Monitor, MonitorConfig};
