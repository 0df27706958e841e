//! Alert decision system
//!
//! The kind registry, entries and schedules, the pure decision engine and
//! the manager that runs it over snapshots.

mod compose;
mod config;
mod evaluator;
mod kind;
mod manager;
mod types;

pub use compose::{compose_threshold_body, compose_threshold_title};
pub use config::{AlertConfig, AlertEntryConfig, DEFAULT_ALERT_TYPE, DISABLED_ALERT_TYPE};
pub use evaluator::{evaluate, Decision, EvaluationContext};
pub use kind::AlertKind;
pub use manager::{AlertManager, AlertManagerConfig, AlertOutcome};
pub use types::{AlertEntry, AlertSchedule, AlertType};
