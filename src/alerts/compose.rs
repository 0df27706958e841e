//! Alert text composition for glucose threshold alerts

use super::kind::AlertKind;
use crate::display::ReadingFormatter;
use crate::domain::BgReading;

/// Build the title of a low/high/very-low/very-high alert
///
/// `<kind title> <value with unit>`, followed by the trend arrow unless the
/// reading hides its slope. Returns an empty string for other kinds.
pub fn compose_threshold_title<F: ReadingFormatter + ?Sized>(
    reading: &BgReading,
    kind: AlertKind,
    formatter: &F,
) -> String {
    if !kind.is_glucose_threshold() {
        return String::new();
    }

    let mut title = format!(
        "{} {}",
        kind.alert_title(),
        formatter.format_value(reading.calculated_value)
    );

    if !reading.hide_slope {
        title.push(' ');
        title.push_str(&formatter.slope_arrow(reading));
    }

    title
}

/// Build the body of a glucose threshold alert: the delta since the prior reading
pub fn compose_threshold_body<F: ReadingFormatter + ?Sized>(
    last: &BgReading,
    prior: Option<&BgReading>,
    formatter: &F,
) -> String {
    formatter.format_delta(last, prior)
}
