use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Cell, Row, Table},
};

use crate::{
    domain::air_quality::PollutantRow,
    ui::{format_value, theme::Theme},
};

pub fn render(frame: &mut Frame, area: Rect, rows: &[PollutantRow], theme: Theme) {
    let header = Row::new(vec![
        Cell::from("Pollutant"),
        Cell::from("Value"),
        Cell::from("Unit"),
    ])
    .style(
        Style::default()
            .fg(theme.muted_text)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.name),
            Cell::from(format_value(row.value)).style(Style::default().fg(theme.accent)),
            Cell::from(row.unit).style(Style::default().fg(theme.muted_text)),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::bordered()
            .title(" Pollutants ")
            .border_style(Style::default().fg(theme.border)),
    )
    .style(Style::default().fg(theme.text));
    frame.render_widget(table, area);
}
