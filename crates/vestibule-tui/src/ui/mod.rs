//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees. Which screen renders is decided entirely by
//! [`App::screen`]; nothing here inspects the session directly.

mod auth;
mod home;
mod profile;
mod status;
mod tabs;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use vestibule_app::{App, Screen};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Splash => render_splash(frame, frame.area()),
        Screen::Auth => auth::render(frame, app, frame.area()),
        Screen::Home | Screen::Profile => render_authenticated(frame, app),
    }
}

/// Render the splash shown while the session restoration is outstanding.
fn render_splash(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from("Loading..."))
        .style(Style::default().fg(Color::DarkGray))
        .centered();

    frame.render_widget(paragraph, center_vertically(area, 1));
}

/// Render the tabbed authenticated shell.
fn render_authenticated(frame: &mut Frame, app: &App) {
    const TABS_HEIGHT: u16 = 1;
    const BODY_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [tabs_area, body_area, status_area] = chunks.as_ref() else {
        return;
    };

    tabs::render(frame, app, *tabs_area);
    match app.screen() {
        Screen::Profile => profile::render(frame, app, *body_area),
        _ => home::render(frame, app, *body_area),
    }
    status::render(frame, app, *status_area);
}

/// Shrink `area` to `height` rows, centered vertically.
fn center_vertically(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y.saturating_add(top),
        width: area.width,
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use ratatui::{Terminal, backend::TestBackend};
    use vestibule_app::{AppEvent, KeyInput};
    use vestibule_auth::Session;

    use super::*;

    fn session() -> Session {
        Session {
            user_id: "user-1".into(),
            email: "a@example.com".into(),
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: Utc::now() + TimeDelta::hours(1),
        }
    }

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn splash_renders_loading() {
        let app = App::new();
        assert!(render_to_text(&app).contains("Loading..."));
    }

    #[test]
    fn entry_screen_renders_form() {
        let mut app = App::new();
        let _ = app.handle(AppEvent::SessionLoaded { session: None });

        let text = render_to_text(&app);
        assert!(text.contains("Email"));
        assert!(text.contains("Password"));
        assert!(text.contains("Log In"));
        assert!(text.contains("Need an account? Sign up"));
    }

    #[test]
    fn home_renders_signed_in_email() {
        let mut app = App::new();
        let _ = app.handle(AppEvent::SessionLoaded { session: Some(session()) });

        let text = render_to_text(&app);
        assert!(text.contains("Home"));
        assert!(text.contains("a@example.com"));
    }

    #[test]
    fn profile_renders_sign_out_hint() {
        let mut app = App::new();
        let _ = app.handle(AppEvent::SessionLoaded { session: Some(session()) });
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));

        let text = render_to_text(&app);
        assert!(text.contains("user-1"));
        assert!(text.contains("sign out"));
    }

    #[test]
    fn entry_error_is_rendered_verbatim() {
        let mut app = App::new();
        let _ = app.handle(AppEvent::SessionLoaded { session: None });
        for c in "a@b.c".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let _ = app.handle(AppEvent::Key(KeyInput::FocusNext));
        for c in "pw".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let _ = app.handle(AppEvent::Key(KeyInput::FocusNext));
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        let _ = app.handle(AppEvent::SignInFailed {
            generation: 1,
            message: "Invalid login credentials".into(),
        });

        assert!(render_to_text(&app).contains("Invalid login credentials"));
    }
}
