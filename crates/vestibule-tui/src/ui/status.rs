//! Status bar
//!
//! Transient status message, falling back to key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use vestibule_app::{App, StatusLevel};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status() {
        Some(message) => {
            let color = match message.level {
                StatusLevel::Info => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(vec![
                Span::raw(" "),
                Span::styled(message.text.clone(), Style::default().fg(color)),
            ])
        },
        None => Line::from(Span::styled(
            " Tab: switch | Enter: select | Esc: quit",
            Style::default().fg(Color::White),
        )),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
