use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    app::state::AppState,
    domain::air_quality::{AirQualityReading, peak_trend_point},
    ui::{format_value, theme::Theme},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, reading: &AirQualityReading, theme: Theme) {
    let block = Block::bordered()
        .title(" Air Quality Index ")
        .border_style(Style::default().fg(theme.border));

    let mut lines = vec![index_line(state, reading, theme)];
    lines.push(Line::from(vec![
        Span::styled("European AQI ", Style::default().fg(theme.muted_text)),
        Span::styled(
            format_index(reading.current.european_index),
            Style::default().fg(theme.text),
        ),
    ]));

    if let Some(tier) = state.severity() {
        lines.push(Line::from(Span::styled(
            tier.advice(),
            Style::default().fg(theme.muted_text),
        )));
    }

    let trend = state.trend();
    if let Some(peak) = peak_trend_point(&trend) {
        lines.push(Line::from(vec![
            Span::styled("Peak PM2.5 ", Style::default().fg(theme.muted_text)),
            Span::styled(
                format!("{} µg/m³", format_value(peak.pm2_5)),
                Style::default().fg(theme.pm25),
            ),
            Span::styled(
                format!(" at {}", peak.time.format("%a %H:%M")),
                Style::default().fg(theme.muted_text),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn index_line(state: &AppState, reading: &AirQualityReading, theme: Theme) -> Line<'static> {
    let value = format_index(reading.current.us_index);
    let mut spans = vec![
        Span::styled("US AQI ", Style::default().fg(theme.muted_text)),
        Span::styled(
            value,
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    match state.severity() {
        Some(tier) => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                tier.label(),
                Style::default()
                    .fg(theme.tier_color(tier))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "  Unknown",
            Style::default().fg(theme.muted_text),
        )),
    }
    Line::from(spans)
}

pub(crate) fn format_index(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{}", v.round() as i64))
}
