//! Alert manager implementation
//!
//! Drives the decision engine: picks the applicable entries for every kind,
//! feeds it the latest snapshot and keeps one pending notification per
//! channel. Delivery stays with the caller.

use super::evaluator::{evaluate, Decision, EvaluationContext};
use super::kind::AlertKind;
use super::types::AlertSchedule;
use crate::display::{ReadingFormatter, StandardFormatter};
use crate::domain::Timestamp;
use crate::source::Snapshot;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Alert manager configuration
#[derive(Debug, Clone)]
pub struct AlertManagerConfig {
    /// Whether alerting is enabled
    pub enabled: bool,
    /// Maximum number of superseded notifications to keep in history
    pub max_history: usize,
}

impl Default for AlertManagerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history: 1000,
        }
    }
}

/// Result of evaluating one kind at one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertOutcome {
    /// Kind evaluated
    pub kind: AlertKind,
    /// Notification channel, used to replace earlier notifications
    pub channel_id: &'static str,
    /// Engine decision
    pub decision: Decision,
    /// When the notification should be shown, if needed
    pub fire_at: Option<Timestamp>,
    /// Evaluation time
    pub evaluated_at: Timestamp,
}

impl AlertOutcome {
    fn new(kind: AlertKind, decision: Decision, now: Timestamp) -> Self {
        // Non-positive delays mean "show immediately"
        let fire_at = decision
            .is_needed()
            .then(|| now.plus_seconds(decision.delay_secs().unwrap_or(0).max(0)));

        Self {
            kind,
            channel_id: kind.notification_channel_id(),
            decision,
            fire_at,
            evaluated_at: now,
        }
    }
}

/// Alert manager
///
/// Holds the schedules per kind and the pending notification per channel.
pub struct AlertManager {
    /// Schedules by kind
    schedules: BTreeMap<AlertKind, AlertSchedule>,
    /// Pending notifications by channel id
    pending: HashMap<&'static str, AlertOutcome>,
    /// Notifications replaced or withdrawn
    history: Vec<AlertOutcome>,
    /// Text rendering for glucose alerts
    formatter: Box<dyn ReadingFormatter + Send + Sync>,
    /// Configuration
    config: AlertManagerConfig,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertManagerConfig) -> Self {
        Self {
            schedules: BTreeMap::new(),
            pending: HashMap::new(),
            history: Vec::new(),
            formatter: Box::new(StandardFormatter::default()),
            config,
        }
    }

    /// Builder: use a different formatter
    pub fn with_formatter(mut self, formatter: Box<dyn ReadingFormatter + Send + Sync>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the schedule for its kind, replacing any previous one
    pub fn add_schedule(&mut self, schedule: AlertSchedule) {
        self.schedules.insert(schedule.kind(), schedule);
    }

    /// Set several schedules
    pub fn add_schedules(&mut self, schedules: Vec<AlertSchedule>) {
        for schedule in schedules {
            self.add_schedule(schedule);
        }
    }

    /// Schedules in kind order
    pub fn schedules(&self) -> impl Iterator<Item = &AlertSchedule> {
        self.schedules.values()
    }

    /// Pending notifications in kind order
    pub fn pending(&self) -> Vec<&AlertOutcome> {
        let mut pending: Vec<_> = self.pending.values().collect();
        pending.sort_by_key(|o| o.kind);
        pending
    }

    /// Replaced or withdrawn notifications, oldest first
    pub fn history(&self) -> &[AlertOutcome] {
        &self.history
    }

    /// Evaluate every configured kind against a snapshot
    ///
    /// `minute_of_day` selects the applicable entries. Returns one outcome
    /// per configured kind, needed or not.
    pub fn evaluate_all(&mut self, snapshot: &Snapshot, minute_of_day: u16) -> Vec<AlertOutcome> {
        if !self.config.enabled {
            return Vec::new();
        }

        let now = snapshot.now_or_current();
        let readings = snapshot.valid_readings();
        let last_calibration = snapshot.last_calibration();

        let mut outcomes = Vec::with_capacity(self.schedules.len());

        for schedule in self.schedules.values() {
            let kind = schedule.kind();
            let (current, next) = schedule.current_and_next(minute_of_day);

            let ctx = EvaluationContext::new(current, now)
                .with_next(next)
                .with_readings(readings.first().copied(), readings.get(1).copied())
                .with_calibration(last_calibration)
                .with_battery(snapshot.battery_level);

            let decision = evaluate(kind, &ctx, self.formatter.as_ref());
            if decision.is_needed() {
                log::debug!(
                    "{} alert needed: {:?} (delay {:?})",
                    kind.logging_label(),
                    decision.title(),
                    decision.delay_secs()
                );
            }

            outcomes.push(AlertOutcome::new(kind, decision, now));
        }

        for outcome in &outcomes {
            self.track(outcome.clone());
        }

        outcomes
    }

    /// Replace or withdraw the pending notification of the outcome's channel
    fn track(&mut self, outcome: AlertOutcome) {
        let previous = if outcome.decision.is_needed() {
            self.pending.insert(outcome.channel_id, outcome)
        } else {
            self.pending.remove(outcome.channel_id)
        };

        if let Some(previous) = previous {
            self.add_to_history(previous);
        }
    }

    /// Add outcome to history
    fn add_to_history(&mut self, outcome: AlertOutcome) {
        self.history.push(outcome);

        if self.history.len() > self.config.max_history {
            self.history
                .drain(0..self.history.len() - self.config.max_history);
        }
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertManagerConfig::default())
    }
}
