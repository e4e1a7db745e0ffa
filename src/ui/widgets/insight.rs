use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Wrap},
};

use crate::{app::state::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let (text, style) = match (&state.insight, state.pipeline_in_flight) {
        (Some(text), _) => (text.as_str(), Style::default().fg(theme.text)),
        (None, true) => (
            "Generating health insights...",
            Style::default()
                .fg(theme.muted_text)
                .add_modifier(Modifier::ITALIC),
        ),
        (None, false) => ("No insight available.", Style::default().fg(theme.muted_text)),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(" Health Insight ")
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(paragraph, area);
}
