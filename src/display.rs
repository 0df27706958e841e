//! Reading display formatting
//!
//! The alert composer does not know about units or arrows; it asks a
//! [`ReadingFormatter`] for each piece of text. [`StandardFormatter`] renders
//! values in the user's unit with the usual CGM trend arrows.

use crate::domain::{BgReading, GlucoseUnit};

/// Readings further apart than this give no delta
pub const MAX_DELTA_GAP_MINUTES: i64 = 21;

/// Deltas beyond this (mg/dL per 5 minutes) indicate bad sensor data
pub const MAX_PLAUSIBLE_DELTA_MGDL: f64 = 100.0;

/// Text rendering of readings for alert titles and bodies
pub trait ReadingFormatter {
    /// Glucose value (mg/dL) with unit
    fn format_value(&self, mgdl: f64) -> String;

    /// Change between two readings with unit
    fn format_delta(&self, last: &BgReading, prior: Option<&BgReading>) -> String;

    /// Trend arrow for a reading
    fn slope_arrow(&self, reading: &BgReading) -> String;
}

/// Formatter using a fixed glucose unit
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter {
    unit: GlucoseUnit,
}

impl StandardFormatter {
    /// Create a formatter for the given unit
    pub fn new(unit: GlucoseUnit) -> Self {
        Self { unit }
    }

    /// Unit used for rendering
    pub fn unit(&self) -> GlucoseUnit {
        self.unit
    }

    fn number(&self, mgdl: f64) -> String {
        match self.unit {
            GlucoseUnit::MgDl => format!("{:.0}", mgdl),
            GlucoseUnit::MmolL => format!("{:.1}", self.unit.convert_mgdl(mgdl)),
        }
    }
}

impl ReadingFormatter for StandardFormatter {
    fn format_value(&self, mgdl: f64) -> String {
        format!("{} {}", self.number(mgdl), self.unit.label())
    }

    fn format_delta(&self, last: &BgReading, prior: Option<&BgReading>) -> String {
        let Some(prior) = prior else {
            return "???".to_string();
        };

        let gap_ms = last.timestamp.millis_since(prior.timestamp);
        if gap_ms == 0 || gap_ms.unsigned_abs() > (MAX_DELTA_GAP_MINUTES * 60_000) as u64 {
            return "???".to_string();
        }

        // Normalised to change per 5 minutes
        let delta = (last.calculated_value - prior.calculated_value) / gap_ms as f64 * 300_000.0;
        if delta.abs() > MAX_PLAUSIBLE_DELTA_MGDL {
            return "ERR".to_string();
        }

        let (zero_band, zero_text) = match self.unit {
            GlucoseUnit::MgDl => (1.0, "0"),
            GlucoseUnit::MmolL => (0.1, "0.0"),
        };
        let shown = self.unit.convert_mgdl(delta);
        if shown > -zero_band && shown < zero_band {
            return format!("{} {}", zero_text, self.unit.label());
        }

        let sign = if delta > 0.0 { "+" } else { "" };
        format!("{}{} {}", sign, self.number(delta), self.unit.label())
    }

    fn slope_arrow(&self, reading: &BgReading) -> String {
        let slope = reading.slope;
        let arrow = if slope <= -3.5 {
            "\u{2193}\u{2193}"
        } else if slope <= -2.0 {
            "\u{2193}"
        } else if slope <= -1.0 {
            "\u{2198}"
        } else if slope <= 1.0 {
            "\u{2192}"
        } else if slope <= 2.0 {
            "\u{2197}"
        } else if slope <= 3.5 {
            "\u{2191}"
        } else {
            "\u{2191}\u{2191}"
        };
        arrow.to_string()
    }
}
