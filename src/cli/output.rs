//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{AlertConfig, AlertKind, AlertOutcome, AlertSchedule};
use crate::cli::args::OutputFormat;
use crate::domain::{Timestamp, TransmitterType};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Column width that fits the longest alert kind title
fn label_width() -> usize {
    AlertKind::ALL
        .iter()
        .map(|k| k.picker_title().chars().count())
        .max()
        .unwrap_or(0)
}

/// Render a minute of the day as HH:MM
pub fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Alert kind registry entry for display
#[derive(Debug, Clone, Serialize)]
pub struct KindEntry {
    pub kind: AlertKind,
    pub label: &'static str,
    pub channel_id: &'static str,
    pub default_value: i32,
    pub unit: &'static str,
    pub needs_value: bool,
}

impl KindEntry {
    /// Build the entry, using the transmitter-specific battery default
    pub fn new(kind: AlertKind, transmitter: Option<TransmitterType>) -> Self {
        Self {
            kind,
            label: kind.picker_title(),
            channel_id: kind.notification_channel_id(),
            default_value: kind.default_value(transmitter),
            unit: kind.value_unit(),
            needs_value: kind.needs_value(),
        }
    }
}

/// Alert kind registry for display
#[derive(Debug, Clone, Serialize)]
pub struct KindList {
    pub kinds: Vec<KindEntry>,
}

impl TableDisplay for KindList {
    fn to_table(&self) -> String {
        let width = label_width();
        let mut output = format!(
            "  {:<width$} {:<9} {:<9} {}\n",
            "Kind",
            "Default",
            "Unit",
            "Channel",
            width = width
        );
        output.push_str(&format!("  {}\n", "─".repeat(width + 40)));

        for entry in &self.kinds {
            output.push_str(&format!(
                "  {:<width$} {:<9} {:<9} {}\n",
                entry.label,
                entry.default_value,
                entry.unit,
                entry.channel_id,
                width = width
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.kinds
            .iter()
            .map(|k| format!("{}={}", k.kind, k.default_value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Seeded alert configuration for display
#[derive(Debug, Clone, Serialize)]
pub struct DefaultsOutput {
    #[serde(flatten)]
    pub config: AlertConfig,
    #[serde(skip)]
    pub toml: String,
}

impl TableDisplay for DefaultsOutput {
    fn to_table(&self) -> String {
        self.toml.clone()
    }

    fn to_compact(&self) -> String {
        self.config
            .entries
            .iter()
            .map(|e| format!("{}@{}={}", e.kind, format_minute(e.start), e.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One schedule entry for display
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntryInfo {
    pub start: String,
    pub value: i32,
    pub alert_type: String,
    pub enabled: bool,
}

/// Validated schedule for display
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleInfo {
    pub kind: AlertKind,
    pub entries: Vec<ScheduleEntryInfo>,
}

impl From<&AlertSchedule> for ScheduleInfo {
    fn from(schedule: &AlertSchedule) -> Self {
        Self {
            kind: schedule.kind(),
            entries: schedule
                .entries()
                .iter()
                .map(|e| ScheduleEntryInfo {
                    start: format_minute(e.start),
                    value: e.value,
                    alert_type: e.alert_type.name.clone(),
                    enabled: e.is_enabled(),
                })
                .collect(),
        }
    }
}

/// Result of the check command
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub source: String,
    pub schedules: Vec<ScheduleInfo>,
    pub unconfigured: Vec<AlertKind>,
    pub rejected: Vec<String>,
}

impl TableDisplay for ScheduleReport {
    fn to_table(&self) -> String {
        let mut output = format!("Configuration: {}\n", self.source);
        output.push_str(&format!("Schedules: {}\n\n", self.schedules.len()));

        for schedule in &self.schedules {
            output.push_str(&format!("  {}\n", schedule.kind.picker_title()));
            for entry in &schedule.entries {
                output.push_str(&format!(
                    "    from {}  {:<6} {}{}\n",
                    entry.start,
                    entry.value,
                    entry.alert_type,
                    if entry.enabled { "" } else { " (disabled)" }
                ));
            }
        }

        if !self.unconfigured.is_empty() {
            output.push_str("\n  Not configured:\n");
            for kind in &self.unconfigured {
                output.push_str(&format!("    • {}\n", kind.picker_title()));
            }
        }

        if !self.rejected.is_empty() {
            output.push_str("\n  Skipped:\n");
            for reason in &self.rejected {
                output.push_str(&format!("    ✗ {}\n", reason));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} schedules, {} unconfigured, {} skipped",
            self.source,
            self.schedules.len(),
            self.unconfigured.len(),
            self.rejected.len()
        )
    }
}

/// Outcomes of one evaluation tick
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluated_at: Timestamp,
    pub minute_of_day: u16,
    pub outcomes: Vec<AlertOutcome>,
}

impl EvaluationReport {
    /// Build a report for one tick
    pub fn new(outcomes: Vec<AlertOutcome>, now: Timestamp, minute_of_day: u16) -> Self {
        Self {
            evaluated_at: now,
            minute_of_day,
            outcomes,
        }
    }

    /// Number of alerts needed
    pub fn needed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.decision.is_needed()).count()
    }
}

impl TableDisplay for EvaluationReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Evaluated at {} ({} local)\n",
            self.evaluated_at,
            format_minute(self.minute_of_day)
        );
        output.push_str(&format!("Alerts needed: {}\n\n", self.needed_count()));

        let width = label_width();
        for outcome in &self.outcomes {
            let label = outcome.kind.picker_title();
            if !outcome.decision.is_needed() {
                output.push_str(&format!("  ✓ {:<width$} not needed\n", label, width = width));
                continue;
            }

            output.push_str(&format!(
                "  ✗ {:<width$} {}\n",
                label,
                outcome.decision.title().unwrap_or_default(),
                width = width
            ));
            if let Some(body) = outcome.decision.body().filter(|b| !b.is_empty()) {
                output.push_str(&format!("      {}\n", body));
            }
            if let Some(delay) = outcome.decision.delay_secs() {
                output.push_str(&format!("      delay: {}s\n", delay));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        let needed: Vec<_> = self
            .outcomes
            .iter()
            .filter(|o| o.decision.is_needed())
            .map(|o| o.kind.to_string())
            .collect();

        if needed.is_empty() {
            "no alerts".to_string()
        } else {
            needed.join(", ")
        }
    }
}

impl TableDisplay for AlertOutcome {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] {}", self.channel_id, self.decision.title().unwrap_or_default());
        if let Some(body) = self.decision.body().filter(|b| !b.is_empty()) {
            output.push_str(&format!("\n  {}", body));
        }
        if let Some(fire_at) = self.fire_at {
            output.push_str(&format!("\n  fire at: {}", fire_at));
        }
        output
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertManager, AlertSchedule};
    use crate::mock::{enabled_entry, reading_minutes_ago, NOW};
    use crate::source::Snapshot;

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(0), "00:00");
        assert_eq!(format_minute(1439), "23:59");
        assert_eq!(format_minute(480), "08:00");
    }

    #[test]
    fn test_kind_list_table() {
        let list = KindList {
            kinds: AlertKind::ALL.iter().map(|k| KindEntry::new(*k, None)).collect(),
        };

        let output = list.to_table();
        assert!(output.contains("missedReadingAlert"));
        assert!(list.to_compact().contains("low=70"));

        // Default values line up after the longest title
        let width = label_width();
        for (row, entry) in output.lines().skip(2).zip(&list.kinds) {
            let chars: Vec<char> = row.chars().collect();
            let label: String = chars[2..2 + width].iter().collect();
            assert_eq!(label.trim_end(), entry.label);
            assert!(chars[3 + width].is_ascii_digit());
        }
    }

    #[test]
    fn test_evaluation_report_aligns_long_titles() {
        let mut manager = AlertManager::default();
        manager.add_schedule(AlertSchedule::single(enabled_entry(AlertKind::Low, 70)).unwrap());
        manager.add_schedule(
            AlertSchedule::single(enabled_entry(AlertKind::BatteryLow, 300)).unwrap(),
        );

        let snapshot = Snapshot {
            now: Some(NOW),
            readings: vec![reading_minutes_ago(1, 110.0)],
            ..Snapshot::default()
        };
        let report = EvaluationReport::new(manager.evaluate_all(&snapshot, 0), NOW, 0);
        let table = report.to_table();

        let widths: Vec<_> = table
            .lines()
            .filter(|line| line.ends_with("not needed"))
            .map(|line| line.chars().count())
            .collect();
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0], widths[1]);
        assert!(table.contains(&format!("{} not needed", AlertKind::BatteryLow.picker_title())));
    }

    #[test]
    fn test_evaluation_report() {
        let mut manager = AlertManager::default();
        manager.add_schedule(AlertSchedule::single(enabled_entry(AlertKind::Low, 70)).unwrap());
        manager.add_schedule(AlertSchedule::single(enabled_entry(AlertKind::High, 170)).unwrap());

        let snapshot = Snapshot {
            now: Some(NOW),
            readings: vec![reading_minutes_ago(1, 60.0)],
            ..Snapshot::default()
        };
        let report = EvaluationReport::new(manager.evaluate_all(&snapshot, 0), NOW, 0);

        assert_eq!(report.needed_count(), 1);
        assert!(report.to_table().contains("Low 60 mg/dL"));
        assert_eq!(report.to_compact(), "low");
    }

    #[test]
    fn test_schedule_report_marks_disabled() {
        let schedules = AlertConfig::seeded(None).to_schedules().unwrap();
        let report = ScheduleReport {
            source: "defaults".to_string(),
            schedules: schedules.iter().map(ScheduleInfo::from).collect(),
            unconfigured: vec![],
            rejected: vec![],
        };

        assert_eq!(report.schedules.len(), AlertKind::ALL.len());
        assert!(!report.to_table().contains("(disabled)"));
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Configuration valid".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}
