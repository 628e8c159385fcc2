//! Entry screen
//!
//! Credential form with email/password fields, a submit button, and the
//! sign-in/sign-up mode toggle. Field contents and focus come from
//! [`CredentialForm`]; this module only draws them.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use vestibule_app::{App, CredentialForm, FormFocus, StatusLevel};

const FORM_WIDTH: u16 = 48;
const FIELD_HEIGHT: u16 = 3;
const LINE_HEIGHT: u16 = 1;
const CURSOR_OFFSET_X: u16 = 1; // inside left border
const CURSOR_OFFSET_Y: u16 = 1; // inside top border

/// Render the entry screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let column = centered_column(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LINE_HEIGHT),     // title
            Constraint::Length(FIELD_HEIGHT),    // email
            Constraint::Length(FIELD_HEIGHT),    // password
            Constraint::Length(LINE_HEIGHT),     // submit
            Constraint::Length(LINE_HEIGHT),     // mode toggle
            Constraint::Length(LINE_HEIGHT),     // status
        ])
        .split(column);

    let [title_area, email_area, password_area, submit_area, toggle_area, status_area] =
        chunks.as_ref()
    else {
        return;
    };

    let title = Paragraph::new(Line::from("Vestibule"))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(title, *title_area);

    render_field(frame, form, "Email", form.email(), FormFocus::Email, *email_area);
    let masked: String = form.password().chars().map(|_| '\u{2022}').collect();
    render_field(frame, form, "Password", &masked, FormFocus::Password, *password_area);

    let submit_text = if form.is_submitting() { "Working..." } else { form.mode().submit_label() };
    let submit = Paragraph::new(Line::from(format!("[ {submit_text} ]")))
        .style(focus_style(form.focus() == FormFocus::Submit))
        .centered();
    frame.render_widget(submit, *submit_area);

    let toggle = Paragraph::new(Line::from(form.mode().toggle_label()))
        .style(focus_style(form.focus() == FormFocus::ModeToggle))
        .centered();
    frame.render_widget(toggle, *toggle_area);

    if let Some(message) = app.status() {
        let color = match message.level {
            StatusLevel::Info => Color::Yellow,
            StatusLevel::Error => Color::Red,
        };
        let status = Paragraph::new(Line::from(message.text.as_str()))
            .style(Style::default().fg(color))
            .centered();
        frame.render_widget(status, *status_area);
    }

    place_cursor(frame, form, *email_area, *password_area);
}

/// Render one bordered text field.
fn render_field(
    frame: &mut Frame,
    form: &CredentialForm,
    label: &str,
    contents: &str,
    focus: FormFocus,
    area: Rect,
) {
    let focused = form.focus() == focus;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {label} "))
        .border_style(focus_style(focused));

    let paragraph = Paragraph::new(contents).block(block);
    frame.render_widget(paragraph, area);
}

/// Put the terminal cursor inside the focused text field.
fn place_cursor(frame: &mut Frame, form: &CredentialForm, email: Rect, password: Rect) {
    let field_area = match form.focus() {
        FormFocus::Email => email,
        FormFocus::Password => password,
        FormFocus::Submit | FormFocus::ModeToggle => return,
    };

    #[allow(clippy::cast_possible_truncation)]
    let cursor_offset = form.cursor() as u16;
    let max_x = field_area
        .x
        .saturating_add(field_area.width)
        .saturating_sub(CURSOR_OFFSET_X + 1);
    let cursor_x = field_area.x.saturating_add(CURSOR_OFFSET_X).saturating_add(cursor_offset);
    let cursor_y = field_area.y.saturating_add(CURSOR_OFFSET_Y);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Center a fixed-width form column in `area`.
fn centered_column(area: Rect) -> Rect {
    const FORM_HEIGHT: u16 =
        LINE_HEIGHT + FIELD_HEIGHT * 2 + LINE_HEIGHT + LINE_HEIGHT + LINE_HEIGHT;

    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
