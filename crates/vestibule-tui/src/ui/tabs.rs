//! Tab bar
//!
//! Authenticated tab titles with the active route highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
};
use vestibule_app::{App, Route};

const TAB_ORDER: [Route; 2] = [Route::Home, Route::Profile];

/// Render the tab bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let titles = TAB_ORDER.map(Route::title);
    let selected = TAB_ORDER.iter().position(|route| *route == app.route()).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}
