//! Profile tab
//!
//! Session details and the sign-out control.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use vestibule_app::App;

/// Render the profile tab.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Profile ");

    let mut lines = Vec::new();
    if let Some(session) = app.auth().session() {
        lines.push(detail_line("Email", &session.email));
        lines.push(detail_line("User ID", &session.user_id));
        lines.push(detail_line(
            "Token expires",
            &session.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to sign out.",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:>14}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_owned()),
    ])
}
