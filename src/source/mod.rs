//! Data source layer
//!
//! Readings, calibrations and battery level come from outside the alerting
//! core (transmitter drivers, storage). This layer abstracts over where a
//! snapshot of them is read from, so the driver can be tested with mocks.

pub mod file;
pub mod traits;

pub use file::FileSource;
pub use traits::{Snapshot, SnapshotSource};
