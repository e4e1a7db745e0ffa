#![allow(clippy::cast_precision_loss)]

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
};

use crate::{domain::air_quality::TrendPoint, ui::theme::Theme};

pub fn render(frame: &mut Frame, area: Rect, points: &[TrendPoint], theme: Theme) {
    let block = Block::bordered()
        .title(format!(" Next {} hours · µg/m³ ", points.len()))
        .border_style(Style::default().fg(theme.border));

    if points.len() < 2 {
        let empty = Paragraph::new("Not enough hourly data for a trend")
            .style(Style::default().fg(theme.muted_text))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let pm25 = series(points, |p| p.pm2_5);
    let ozone = series(points, |p| p.ozone);
    let y_max = pm25
        .iter()
        .chain(ozone.iter())
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(10.0)
        * 1.1;
    let x_max = (points.len() - 1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("PM2.5")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.pm25))
            .data(&pm25),
        Dataset::default()
            .name("Ozone")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.ozone))
            .data(&ozone),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted_text))
                .bounds([0.0, x_max])
                .labels(time_labels(points)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted_text))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Points for one pollutant; hours without a value are left out.
fn series(points: &[TrendPoint], value: impl Fn(&TrendPoint) -> Option<f64>) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .filter_map(|(idx, point)| value(point).map(|v| (idx as f64, v)))
        .collect()
}

fn time_labels(points: &[TrendPoint]) -> Vec<Span<'static>> {
    let label = |point: &TrendPoint| Span::raw(point.time.format("%H:%M").to_string());
    let first = points.first().map(label);
    let middle = points.get(points.len() / 2).map(label);
    let last = points.last().map(label);
    [first, middle, last].into_iter().flatten().collect()
}
