//! Alert configuration
//!
//! TOML model for alert types and per-kind entries, plus the first-run
//! configuration seeded from each kind's default value.

use super::kind::AlertKind;
use super::types::{AlertEntry, AlertSchedule, AlertType};
use crate::domain::TransmitterType;
use crate::error::{ConfigError, DomainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Name of the alert type seeded as enabled
pub const DEFAULT_ALERT_TYPE: &str = "Default";

/// Name of the alert type seeded as disabled
pub const DISABLED_ALERT_TYPE: &str = "Disabled";

/// Alert section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Named alert types
    #[serde(default)]
    pub types: Vec<AlertType>,
    /// Entries for all kinds
    #[serde(default)]
    pub entries: Vec<AlertEntryConfig>,
}

impl AlertConfig {
    /// First-run configuration
    ///
    /// One all-day entry per kind with the kind's default value, bound to an
    /// enabled alert type. A disabled type is provided for users to switch to.
    pub fn seeded(transmitter: Option<TransmitterType>) -> Self {
        Self {
            types: vec![
                AlertType::new(DEFAULT_ALERT_TYPE),
                AlertType::new(DISABLED_ALERT_TYPE).disabled(),
            ],
            entries: AlertKind::ALL
                .iter()
                .map(|kind| AlertEntryConfig {
                    kind: *kind,
                    start: 0,
                    value: kind.default_value(transmitter),
                    alert_type: DEFAULT_ALERT_TYPE.to_string(),
                })
                .collect(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Resolve into validated schedules, one per configured kind
    ///
    /// A kind whose entries do not form a valid schedule is skipped with a
    /// warning; the other kinds keep alerting. Unknown or duplicate alert
    /// type names fail the whole configuration.
    pub fn to_schedules(&self) -> Result<Vec<AlertSchedule>> {
        let (schedules, rejected) = self.resolve()?;
        for error in &rejected {
            log::warn!("Skipping invalid alert schedule: {}", error);
        }
        Ok(schedules)
    }

    /// Schedule errors of the kinds [`to_schedules`](Self::to_schedules) skips
    pub fn rejected_schedules(&self) -> Result<Vec<DomainError>> {
        Ok(self.resolve()?.1)
    }

    fn resolve(&self) -> Result<(Vec<AlertSchedule>, Vec<DomainError>)> {
        let types = self.types_by_name()?;

        let mut by_kind: BTreeMap<AlertKind, Vec<AlertEntry>> = BTreeMap::new();
        for entry in &self.entries {
            let alert_type = types.get(entry.alert_type.as_str()).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: "alert_type".to_string(),
                    message: format!(
                        "{} entry at minute {} uses unknown alert type '{}'",
                        entry.kind, entry.start, entry.alert_type
                    ),
                }
            })?;

            by_kind.entry(entry.kind).or_default().push(AlertEntry {
                kind: entry.kind,
                start: entry.start,
                value: entry.value,
                alert_type: (*alert_type).clone(),
            });
        }

        let mut schedules = Vec::with_capacity(by_kind.len());
        let mut rejected = Vec::new();
        for (kind, entries) in by_kind {
            match AlertSchedule::new(kind, entries) {
                Ok(schedule) => schedules.push(schedule),
                Err(e) => rejected.push(e),
            }
        }
        Ok((schedules, rejected))
    }

    /// Kinds without any entry
    pub fn unconfigured_kinds(&self) -> Vec<AlertKind> {
        AlertKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.entries.iter().any(|e| e.kind == *kind))
            .collect()
    }

    fn types_by_name(&self) -> Result<HashMap<&str, &AlertType>> {
        let mut types = HashMap::with_capacity(self.types.len());
        for alert_type in &self.types {
            if types.insert(alert_type.name.as_str(), alert_type).is_some() {
                return Err(ConfigError::InvalidValue {
                    key: "types".to_string(),
                    message: format!("duplicate alert type '{}'", alert_type.name),
                }
                .into());
            }
        }
        Ok(types)
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::seeded(None)
    }
}

/// Alert entry configuration (TOML-friendly format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntryConfig {
    /// Kind configured
    pub kind: AlertKind,
    /// Minute of the day the entry starts
    #[serde(default)]
    pub start: u16,
    /// Threshold value
    pub value: i32,
    /// Name of the alert type
    #[serde(default = "default_alert_type")]
    pub alert_type: String,
}

fn default_alert_type() -> String {
    DEFAULT_ALERT_TYPE.to_string()
}
