pub mod report;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    ui::theme::Theme,
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 16;

pub fn render(frame: &mut Frame, state: &AppState, theme: Theme) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("aqi-dashboard"));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], state, theme);
    render_body(frame, chunks[1], state, theme);
    render_footer(frame, chunks[2], state, theme);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let place = state
        .location
        .as_ref()
        .map_or_else(|| "Locating...".to_string(), |l| l.display_name());
    let mut spans = vec![Span::styled(
        place,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(reading) = &state.reading {
        spans.push(Span::styled(
            format!(
                "  fetched {}",
                reading
                    .fetched_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(theme.muted_text),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let Some(reading) = &state.reading else {
        render_placeholder(frame, area, state, theme);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(6),
            Constraint::Length(6),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    widgets::summary::render(frame, top[0], state, reading, theme);
    if let Some(pollutants) = state.pollutant_rows() {
        widgets::pollutants::render(frame, top[1], &pollutants, theme);
    }
    widgets::trend::render(frame, rows[1], &state.trend(), theme);
    widgets::insight::render(frame, rows[2], state, theme);
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let (text, style) = match (&state.mode, &state.last_error) {
        (AppMode::Error, Some(err)) => (err.clone(), Style::default().fg(theme.danger)),
        _ => (
            state.status_message.clone(),
            Style::default().fg(theme.muted_text),
        ),
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(theme.border)));
    frame.render_widget(paragraph, centered_rect(70, 30, area));
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let line = if state.search_open {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.accent)),
            Span::styled(
                format!("{}_", state.search_query),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                "  Enter search · Esc cancel",
                Style::default().fg(theme.muted_text),
            ),
        ])
    } else {
        let status_style = if state.last_error.is_some() {
            Style::default().fg(theme.danger)
        } else {
            Style::default().fg(theme.muted_text)
        };
        Line::from(vec![
            Span::styled(state.status_message.clone(), status_style),
            Span::styled(
                "  / search · r refresh · q quit",
                Style::default().fg(theme.muted_text),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Pollutant or series value for display.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if v.abs() < 1.0 => format!("{v:.2}"),
        Some(v) => format!("{v:.1}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::format_value;

    #[test]
    fn format_value_uses_more_precision_below_one() {
        assert_eq!(format_value(Some(0.8)), "0.80");
        assert_eq!(format_value(Some(18.44)), "18.4");
        assert_eq!(format_value(None), "N/A");
    }
}
