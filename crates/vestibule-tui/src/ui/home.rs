//! Home tab
//!
//! Landing screen for an authenticated session.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use vestibule_app::App;

/// Render the home tab.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Home ");

    // The guard only renders this screen with a session present.
    let email = app.auth().session().map_or("", |session| session.email.as_str());

    let lines = vec![
        Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(email.to_owned(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Switch tabs with Tab. Your session persists across restarts.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
