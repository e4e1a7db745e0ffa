use std::fmt::Write as _;

use crate::{
    app::state::AppState,
    ui::{format_value, widgets::summary::format_index},
};

/// Plain-text snapshot of the dashboard for `--one-shot`.
#[must_use]
pub fn render_report(state: &AppState) -> String {
    let mut out = String::new();

    let place = state
        .location
        .as_ref()
        .map_or_else(|| "unknown location".to_string(), |l| l.display_name());

    let Some(reading) = &state.reading else {
        let message = state.last_error.as_deref().unwrap_or("No data available.");
        let _ = writeln!(out, "Air quality for {place}");
        let _ = writeln!(out, "Error: {message}");
        return out;
    };

    let _ = writeln!(out, "Air quality for {place}");
    let tier = state.severity();
    let _ = writeln!(
        out,
        "US AQI:        {} ({})",
        format_index(reading.current.us_index),
        tier.map_or("Unknown", |t| t.label())
    );
    let _ = writeln!(
        out,
        "European AQI:  {}",
        format_index(reading.current.european_index)
    );
    if let Some(tier) = tier {
        let _ = writeln!(out, "Advice:        {}", tier.advice());
    }

    out.push_str("\nPollutants\n");
    if let Some(rows) = state.pollutant_rows() {
        for row in rows {
            let _ = writeln!(
                out,
                "  {:<18}{:>8} {}",
                row.name,
                format_value(row.value),
                row.unit
            );
        }
    }

    let trend = state.trend();
    if !trend.is_empty() {
        let _ = writeln!(out, "\nNext {} hours (µg/m³)", trend.len());
        let _ = writeln!(out, "  {:<7}{:>8}{:>8}", "Time", "PM2.5", "Ozone");
        for point in &trend {
            let _ = writeln!(
                out,
                "  {:<7}{:>8}{:>8}",
                point.time.format("%H:%M").to_string(),
                format_value(point.pm2_5),
                format_value(point.ozone)
            );
        }
    }

    out.push_str("\nHealth insight\n");
    let insight = state.insight.as_deref().unwrap_or("No insight available.");
    let _ = writeln!(out, "  {insight}");

    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "\nWarning: {err}");
    }
    out
}
