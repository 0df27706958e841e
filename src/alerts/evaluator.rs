//! Alert decision engine
//!
//! [`evaluate`] maps an alert kind and an [`EvaluationContext`] to a
//! [`Decision`]. It is a pure function: no I/O, no hidden state, and the
//! current time comes from the context. Missing or invalid evidence never
//! raises an error, it just means no alert is needed.

use super::compose::{compose_threshold_body, compose_threshold_title};
use super::kind::AlertKind;
use super::types::AlertEntry;
use crate::display::ReadingFormatter;
use crate::domain::{BatteryLevel, BgReading, Calibration, Timestamp};
use serde::{Serialize, Serializer};

/// Inputs for one evaluation
///
/// Each kind reads only part of it:
///
/// | kind                    | reads                                            |
/// |-------------------------|--------------------------------------------------|
/// | low, very-low, high, very-high | `current`, `last_reading`, `prior_reading` |
/// | missed reading          | `current`, `next`, `last_reading`, `now`         |
/// | calibration             | `current`, `last_calibration`, `now`             |
/// | battery low             | `current`, `battery_level`                       |
///
/// Readings and calibration must belong to the active sensor; with no active
/// sensor the caller passes none.
#[derive(Debug, Clone)]
pub struct EvaluationContext<'a> {
    /// Entry applying now
    pub current: &'a AlertEntry,
    /// Entry applying after `current`
    pub next: Option<&'a AlertEntry>,
    /// Latest reading
    pub last_reading: Option<&'a BgReading>,
    /// Reading before `last_reading`
    pub prior_reading: Option<&'a BgReading>,
    /// Latest calibration
    pub last_calibration: Option<&'a Calibration>,
    /// Latest known transmitter battery level
    pub battery_level: Option<BatteryLevel>,
    /// Evaluation time
    pub now: Timestamp,
}

impl<'a> EvaluationContext<'a> {
    /// Context with only the current entry and time
    pub fn new(current: &'a AlertEntry, now: Timestamp) -> Self {
        Self {
            current,
            next: None,
            last_reading: None,
            prior_reading: None,
            last_calibration: None,
            battery_level: None,
            now,
        }
    }

    /// Builder: set next entry
    pub fn with_next(mut self, next: Option<&'a AlertEntry>) -> Self {
        self.next = next;
        self
    }

    /// Builder: set last and prior readings
    pub fn with_readings(
        mut self,
        last: Option<&'a BgReading>,
        prior: Option<&'a BgReading>,
    ) -> Self {
        self.last_reading = last;
        self.prior_reading = prior;
        self
    }

    /// Builder: set last calibration
    pub fn with_calibration(mut self, calibration: Option<&'a Calibration>) -> Self {
        self.last_calibration = calibration;
        self
    }

    /// Builder: set battery level
    pub fn with_battery(mut self, level: Option<BatteryLevel>) -> Self {
        self.battery_level = level;
        self
    }
}

/// Outcome of evaluating one alert kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No notification
    NotNeeded,
    /// A notification must be raised
    Needed {
        /// Notification title, always present
        title: String,
        /// Notification body, empty for non-glucose alerts
        body: String,
        /// Seconds from now until delivery; may be zero or negative
        delay_secs: Option<i64>,
    },
}

impl Decision {
    fn needed(title: impl Into<String>, body: impl Into<String>, delay_secs: Option<i64>) -> Self {
        Self::Needed {
            title: title.into(),
            body: body.into(),
            delay_secs,
        }
    }

    /// Whether a notification is needed
    pub fn is_needed(&self) -> bool {
        matches!(self, Self::Needed { .. })
    }

    /// Title, present only when needed
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Needed { title, .. } => Some(title.as_str()),
            Self::NotNeeded => None,
        }
    }

    /// Body, present only when needed
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Needed { body, .. } => Some(body.as_str()),
            Self::NotNeeded => None,
        }
    }

    /// Delay in seconds, present only for delayed alerts
    pub fn delay_secs(&self) -> Option<i64> {
        match self {
            Self::Needed { delay_secs, .. } => *delay_secs,
            Self::NotNeeded => None,
        }
    }
}

// Flat `{needed, title, body, delay_secs}` shape for JSON output
impl Serialize for Decision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flat<'a> {
            needed: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            body: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            delay_secs: Option<i64>,
        }

        Flat {
            needed: self.is_needed(),
            title: self.title(),
            body: self.body(),
            delay_secs: self.delay_secs(),
        }
        .serialize(serializer)
    }
}

/// Decide whether `kind` must alert given `ctx`
pub fn evaluate<F: ReadingFormatter + ?Sized>(
    kind: AlertKind,
    ctx: &EvaluationContext<'_>,
    formatter: &F,
) -> Decision {
    let decision = match kind {
        AlertKind::Low | AlertKind::VeryLow => {
            evaluate_glucose(kind, ctx, formatter, |value, threshold| value < threshold)
        }
        AlertKind::High | AlertKind::VeryHigh => {
            evaluate_glucose(kind, ctx, formatter, |value, threshold| value > threshold)
        }
        AlertKind::MissedReading => evaluate_missed_reading(ctx),
        AlertKind::Calibration => evaluate_calibration(ctx),
        AlertKind::BatteryLow => evaluate_battery(ctx),
    };

    log::trace!(
        "{}: needed={} delay={:?}",
        kind.logging_label(),
        decision.is_needed(),
        decision.delay_secs()
    );

    decision
}

fn evaluate_glucose<F, C>(
    kind: AlertKind,
    ctx: &EvaluationContext<'_>,
    formatter: &F,
    crosses: C,
) -> Decision
where
    F: ReadingFormatter + ?Sized,
    C: Fn(f64, f64) -> bool,
{
    if !ctx.current.is_enabled() {
        return Decision::NotNeeded;
    }

    let Some(last) = ctx.last_reading else {
        return Decision::NotNeeded;
    };

    if !last.is_valid() {
        log::warn!(
            "{}: ignoring reading at {} with invalid value",
            kind.logging_label(),
            last.timestamp
        );
        return Decision::NotNeeded;
    }

    if !crosses(last.calculated_value, f64::from(ctx.current.value)) {
        return Decision::NotNeeded;
    }

    Decision::needed(
        compose_threshold_title(last, kind, formatter),
        compose_threshold_body(last, ctx.prior_reading, formatter),
        None,
    )
}

fn evaluate_missed_reading(ctx: &EvaluationContext<'_>) -> Decision {
    // Stale or invalid last readings still count here
    let Some(last) = ctx.last_reading else {
        return Decision::NotNeeded;
    };

    let entry = if ctx.current.is_enabled() {
        ctx.current
    } else {
        match ctx.next {
            Some(next) if next.is_enabled() => next,
            _ => return Decision::NotNeeded,
        }
    };

    let minutes_since_last = ctx.now.minutes_since(last.timestamp);
    let delay_secs = i64::from(entry.value)
        .saturating_sub(minutes_since_last)
        .saturating_mul(60);

    Decision::needed(AlertKind::MissedReading.alert_title(), "", Some(delay_secs))
}

fn evaluate_calibration(ctx: &EvaluationContext<'_>) -> Decision {
    if !ctx.current.is_enabled() {
        return Decision::NotNeeded;
    }

    let Some(calibration) = ctx.last_calibration else {
        return Decision::NotNeeded;
    };

    if calibration.age_seconds(ctx.now) > i64::from(ctx.current.value) * 3600 {
        Decision::needed(AlertKind::Calibration.alert_title(), "", None)
    } else {
        Decision::NotNeeded
    }
}

fn evaluate_battery(ctx: &EvaluationContext<'_>) -> Decision {
    if !ctx.current.is_enabled() {
        return Decision::NotNeeded;
    }

    let Some(level) = ctx.battery_level else {
        return Decision::NotNeeded;
    };

    if i64::from(ctx.current.value) > i64::from(level.value()) {
        Decision::needed(AlertKind::BatteryLow.alert_title(), "", None)
    } else {
        Decision::NotNeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::types::AlertType;
    use crate::mock::{disabled_entry, enabled_entry, reading_minutes_ago, EchoFormatter, NOW};

    fn eval(kind: AlertKind, ctx: &EvaluationContext<'_>) -> Decision {
        evaluate(kind, ctx, &EchoFormatter)
    }

    #[test]
    fn test_low_fires_below_threshold() {
        let entry = enabled_entry(AlertKind::Low, 70);
        let last = reading_minutes_ago(0, 65.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), None);

        let decision = eval(AlertKind::Low, &ctx);
        assert!(decision.is_needed());
        assert_eq!(decision.title(), Some("Low <65>"));
        assert_eq!(decision.body(), Some("<delta 65 from none>"));
        assert_eq!(decision.delay_secs(), None);
    }

    #[test]
    fn test_low_not_at_threshold() {
        let entry = enabled_entry(AlertKind::Low, 70);
        let last = reading_minutes_ago(0, 70.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), None);
        assert_eq!(eval(AlertKind::Low, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_low_ignores_sentinel_reading() {
        let entry = enabled_entry(AlertKind::Low, 70);
        let last = reading_minutes_ago(0, 0.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), None);
        assert_eq!(eval(AlertKind::Low, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_low_without_reading() {
        let entry = enabled_entry(AlertKind::VeryLow, 55);
        let ctx = EvaluationContext::new(&entry, NOW);
        assert_eq!(eval(AlertKind::VeryLow, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_very_low_uses_own_title() {
        let entry = enabled_entry(AlertKind::VeryLow, 55);
        let last = reading_minutes_ago(0, 48.0);
        let prior = reading_minutes_ago(5, 52.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), Some(&prior));

        let decision = eval(AlertKind::VeryLow, &ctx);
        assert_eq!(decision.title(), Some("Very Low <48>"));
        assert_eq!(decision.body(), Some("<delta 48 from 52>"));
    }

    #[test]
    fn test_high_is_strictly_greater() {
        let entry = enabled_entry(AlertKind::High, 180);
        let above = reading_minutes_ago(0, 181.0);
        let equal = reading_minutes_ago(0, 180.0);

        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&above), None);
        assert!(eval(AlertKind::High, &ctx).is_needed());

        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&equal), None);
        assert!(!eval(AlertKind::High, &ctx).is_needed());
    }

    #[test]
    fn test_very_high_ignores_sentinel() {
        let entry = enabled_entry(AlertKind::VeryHigh, 250);
        let last = reading_minutes_ago(0, 0.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), None);
        assert!(!eval(AlertKind::VeryHigh, &ctx).is_needed());
    }

    #[test]
    fn test_disabled_entry_never_fires() {
        let last = reading_minutes_ago(90, 30.0);
        let calibration = Calibration::new(NOW.minus_hours(100), 120.0);

        for kind in AlertKind::ALL {
            let entry = disabled_entry(kind, 10_000);
            let ctx = EvaluationContext::new(&entry, NOW)
                .with_readings(Some(&last), None)
                .with_calibration(Some(&calibration))
                .with_battery(Some(BatteryLevel::new(0)));
            let decision = eval(kind, &ctx);
            assert_eq!(decision, Decision::NotNeeded, "{} fired while disabled", kind);
        }
    }

    #[test]
    fn test_missed_reading_falls_back_to_next_entry() {
        let current = disabled_entry(AlertKind::MissedReading, 30);
        let next = enabled_entry(AlertKind::MissedReading, 20);
        let last = reading_minutes_ago(25, 110.0);
        let ctx = EvaluationContext::new(&current, NOW)
            .with_next(Some(&next))
            .with_readings(Some(&last), None);

        let decision = eval(AlertKind::MissedReading, &ctx);
        assert!(decision.is_needed());
        assert_eq!(decision.delay_secs(), Some(-300));
        assert_eq!(decision.body(), Some(""));
        assert_eq!(decision.title(), Some("Missed Reading"));
    }

    #[test]
    fn test_missed_reading_prefers_current_entry() {
        let current = enabled_entry(AlertKind::MissedReading, 30);
        let next = enabled_entry(AlertKind::MissedReading, 60);
        let last = reading_minutes_ago(5, 110.0);
        let ctx = EvaluationContext::new(&current, NOW)
            .with_next(Some(&next))
            .with_readings(Some(&last), None);

        assert_eq!(eval(AlertKind::MissedReading, &ctx).delay_secs(), Some(25 * 60));
    }

    #[test]
    fn test_missed_reading_truncates_partial_minutes() {
        let current = enabled_entry(AlertKind::MissedReading, 30);
        let last = BgReading::new(NOW.plus_seconds(-(10 * 60 + 59)), 110.0);
        let ctx = EvaluationContext::new(&current, NOW).with_readings(Some(&last), None);

        assert_eq!(eval(AlertKind::MissedReading, &ctx).delay_secs(), Some(20 * 60));
    }

    #[test]
    fn test_missed_reading_needs_last_reading() {
        let current = enabled_entry(AlertKind::MissedReading, 30);
        let next = enabled_entry(AlertKind::MissedReading, 20);
        let ctx = EvaluationContext::new(&current, NOW).with_next(Some(&next));
        assert_eq!(eval(AlertKind::MissedReading, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_missed_reading_with_both_entries_disabled() {
        let current = disabled_entry(AlertKind::MissedReading, 30);
        let next = disabled_entry(AlertKind::MissedReading, 20);
        let last = reading_minutes_ago(25, 110.0);
        let ctx = EvaluationContext::new(&current, NOW)
            .with_next(Some(&next))
            .with_readings(Some(&last), None);
        assert_eq!(eval(AlertKind::MissedReading, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_missed_reading_accepts_sentinel_reading() {
        let current = enabled_entry(AlertKind::MissedReading, 30);
        let last = reading_minutes_ago(10, 0.0);
        let ctx = EvaluationContext::new(&current, NOW).with_readings(Some(&last), None);
        assert_eq!(eval(AlertKind::MissedReading, &ctx).delay_secs(), Some(20 * 60));
    }

    #[test]
    fn test_calibration_due() {
        let calibration = Calibration::new(NOW.minus_hours(5), 100.0);

        let entry = enabled_entry(AlertKind::Calibration, 4);
        let ctx = EvaluationContext::new(&entry, NOW).with_calibration(Some(&calibration));
        let decision = eval(AlertKind::Calibration, &ctx);
        assert!(decision.is_needed());
        assert_eq!(decision.title(), Some("Calibration Needed"));
        assert_eq!(decision.body(), Some(""));
        assert_eq!(decision.delay_secs(), None);

        let entry = enabled_entry(AlertKind::Calibration, 6);
        let ctx = EvaluationContext::new(&entry, NOW).with_calibration(Some(&calibration));
        assert!(!eval(AlertKind::Calibration, &ctx).is_needed());
    }

    #[test]
    fn test_calibration_exactly_at_threshold() {
        let calibration = Calibration::new(NOW.minus_hours(4), 100.0);
        let entry = enabled_entry(AlertKind::Calibration, 4);
        let ctx = EvaluationContext::new(&entry, NOW).with_calibration(Some(&calibration));
        assert!(!eval(AlertKind::Calibration, &ctx).is_needed());
    }

    #[test]
    fn test_calibration_absent() {
        let entry = enabled_entry(AlertKind::Calibration, 4);
        let ctx = EvaluationContext::new(&entry, NOW);
        assert!(!eval(AlertKind::Calibration, &ctx).is_needed());
    }

    #[test]
    fn test_missed_reading_with_extreme_timestamps() {
        let current = enabled_entry(AlertKind::MissedReading, 30);

        let ancient = BgReading::new(Timestamp::from_millis(i64::MIN), 100.0);
        let ctx = EvaluationContext::new(&current, NOW).with_readings(Some(&ancient), None);
        let delay = eval(AlertKind::MissedReading, &ctx).delay_secs().unwrap();
        assert!(delay < 0);

        let future = BgReading::new(Timestamp::from_millis(i64::MAX), 100.0);
        let ctx = EvaluationContext::new(&current, NOW).with_readings(Some(&future), None);
        let delay = eval(AlertKind::MissedReading, &ctx).delay_secs().unwrap();
        assert!(delay > 0);
    }

    #[test]
    fn test_calibration_with_extreme_timestamp() {
        let entry = enabled_entry(AlertKind::Calibration, 24);
        let ancient = Calibration::new(Timestamp::from_millis(i64::MIN), 100.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_calibration(Some(&ancient));
        assert!(eval(AlertKind::Calibration, &ctx).is_needed());
    }

    #[test]
    fn test_missed_reading_disabled_without_next_entry() {
        let current = disabled_entry(AlertKind::MissedReading, 30);
        let last = reading_minutes_ago(45, 110.0);
        let ctx = EvaluationContext::new(&current, NOW)
            .with_next(None)
            .with_readings(Some(&last), None);
        assert_eq!(eval(AlertKind::MissedReading, &ctx), Decision::NotNeeded);
    }

    #[test]
    fn test_very_high_is_strictly_greater() {
        let entry = enabled_entry(AlertKind::VeryHigh, 250);
        let above = reading_minutes_ago(0, 251.0);
        let equal = reading_minutes_ago(0, 250.0);

        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&above), None);
        let decision = eval(AlertKind::VeryHigh, &ctx);
        assert!(decision.is_needed());
        assert_eq!(decision.title(), Some("Very High <251>"));

        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&equal), None);
        assert!(!eval(AlertKind::VeryHigh, &ctx).is_needed());
    }

    #[test]
    fn test_battery_low() {
        let entry = enabled_entry(AlertKind::BatteryLow, 20);

        let ctx = EvaluationContext::new(&entry, NOW).with_battery(Some(BatteryLevel::new(15)));
        let decision = eval(AlertKind::BatteryLow, &ctx);
        assert!(decision.is_needed());
        assert_eq!(decision.title(), Some("Transmitter Battery Low"));

        let ctx = EvaluationContext::new(&entry, NOW).with_battery(Some(BatteryLevel::new(25)));
        assert!(!eval(AlertKind::BatteryLow, &ctx).is_needed());

        let ctx = EvaluationContext::new(&entry, NOW).with_battery(Some(BatteryLevel::new(20)));
        assert!(!eval(AlertKind::BatteryLow, &ctx).is_needed());

        let ctx = EvaluationContext::new(&entry, NOW);
        assert!(!eval(AlertKind::BatteryLow, &ctx).is_needed());
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let entry = AlertEntry::new(AlertKind::MissedReading, 15, AlertType::new("Default"));
        let last = reading_minutes_ago(40, 120.0);
        let ctx = EvaluationContext::new(&entry, NOW).with_readings(Some(&last), None);

        assert_eq!(
            eval(AlertKind::MissedReading, &ctx),
            eval(AlertKind::MissedReading, &ctx)
        );
    }

    #[test]
    fn test_not_needed_has_no_fields() {
        let decision = Decision::NotNeeded;
        assert!(decision.title().is_none());
        assert!(decision.body().is_none());
        assert!(decision.delay_secs().is_none());
    }

    #[test]
    fn test_decision_json_shape() {
        let json = serde_json::to_value(Decision::NotNeeded).unwrap();
        assert_eq!(json, serde_json::json!({ "needed": false }));

        let json = serde_json::to_value(Decision::needed("Missed Reading", "", Some(-300))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "needed": true,
                "title": "Missed Reading",
                "body": "",
                "delay_secs": -300
            })
        );
    }
}
