//! Credential form logic for the entry screen.
//!
//! Owns the email/password buffers, focus, the sign-in/sign-up mode
//! toggle, and submission state. Pure: key handling returns a
//! [`FormEffect`] for the [`crate::App`] to translate into actions.

use crate::KeyInput;

/// Two-valued submission mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign in to an existing account.
    SignIn,
    /// Create a new account.
    SignUp,
}

impl AuthMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    /// Label for the submit button.
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Log In",
            Self::SignUp => "Create Account",
        }
    }

    /// Label for the mode toggle line.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::SignIn => "Need an account? Sign up",
            Self::SignUp => "Have an account? Log in",
        }
    }
}

/// Focusable elements of the credential form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// Email text field.
    Email,
    /// Password text field.
    Password,
    /// Submit button.
    Submit,
    /// Mode toggle.
    ModeToggle,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::ModeToggle,
            Self::ModeToggle => Self::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Email => Self::ModeToggle,
            Self::Password => Self::Email,
            Self::Submit => Self::Password,
            Self::ModeToggle => Self::Submit,
        }
    }
}

/// A validated submission handed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Mode at submission time.
    pub mode: AuthMode,
    /// Email, trimmed of surrounding whitespace.
    pub email: String,
    /// Password, verbatim.
    pub password: String,
    /// Submission generation; completion events carrying an older
    /// generation are disregarded.
    pub generation: u64,
}

/// Result of feeding one key into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// Text, focus, or mode changed; redraw.
    Changed,
    /// Key had no effect (e.g. submit while a request is outstanding).
    Ignored,
    /// Submit attempted with an empty field; local validation error.
    MissingFields,
    /// A validated submission to dispatch.
    Submitted(SubmitRequest),
}

/// Entry-screen credential form state machine.
#[derive(Debug, Clone)]
pub struct CredentialForm {
    email: String,
    password: String,
    focus: FormFocus,
    cursor: usize,
    mode: AuthMode,
    submitting: bool,
    generation: u64,
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialForm {
    /// Create an empty form in sign-in mode.
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: FormFocus::Email,
            cursor: 0,
            mode: AuthMode::SignIn,
            submitting: false,
            generation: 0,
        }
    }

    /// Email buffer contents.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password buffer contents.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Currently focused element.
    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    /// Cursor position within the focused text field.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current mode.
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Whether a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Generation of the most recent submission.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle a key on the entry screen.
    pub fn handle_key(&mut self, key: KeyInput) -> FormEffect {
        match key {
            KeyInput::Char(c) => self.insert_char(c),
            KeyInput::Backspace => self.backspace(),
            KeyInput::Delete => self.delete(),
            KeyInput::CursorLeft => self.move_cursor_left(),
            KeyInput::CursorRight => self.move_cursor_right(),
            KeyInput::CursorStart => self.set_cursor(0),
            KeyInput::CursorEnd => self.set_cursor(usize::MAX),
            KeyInput::FocusNext | KeyInput::Tab => self.set_focus(self.focus.next()),
            KeyInput::FocusPrev => self.set_focus(self.focus.prev()),
            KeyInput::Enter => self.activate(),
            KeyInput::Esc => FormEffect::Ignored,
        }
    }

    /// Mark the submission with `generation` as complete.
    ///
    /// Returns false (and changes nothing) when the generation is stale,
    /// i.e. the result belongs to a submission that has been superseded
    /// or whose screen was left.
    pub fn finish_submit(&mut self, generation: u64) -> bool {
        if self.submitting && generation == self.generation {
            self.submitting = false;
            true
        } else {
            false
        }
    }

    /// Clear the form after navigating away from the entry screen.
    ///
    /// The generation counter survives so stale completion events from
    /// before the reset remain identifiable.
    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.focus = FormFocus::Email;
        self.cursor = 0;
        self.mode = AuthMode::SignIn;
        self.submitting = false;
    }

    fn field(&self) -> Option<&String> {
        match self.focus {
            FormFocus::Email => Some(&self.email),
            FormFocus::Password => Some(&self.password),
            FormFocus::Submit | FormFocus::ModeToggle => None,
        }
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::Email => Some(&mut self.email),
            FormFocus::Password => Some(&mut self.password),
            FormFocus::Submit | FormFocus::ModeToggle => None,
        }
    }

    fn field_len(&self) -> usize {
        match self.focus {
            FormFocus::Email => self.email.len(),
            FormFocus::Password => self.password.len(),
            FormFocus::Submit | FormFocus::ModeToggle => 0,
        }
    }

    fn insert_char(&mut self, c: char) -> FormEffect {
        let cursor = self.cursor;
        let Some(field) = self.field_mut() else {
            return FormEffect::Ignored;
        };
        field.insert(cursor, c);
        self.cursor = cursor.saturating_add(c.len_utf8());
        FormEffect::Changed
    }

    fn backspace(&mut self) -> FormEffect {
        if self.cursor == 0 {
            return FormEffect::Ignored;
        }
        let cursor = self.cursor;
        let Some(field) = self.field_mut() else {
            return FormEffect::Ignored;
        };
        let prev = field[..cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(idx, _)| idx);
        field.remove(prev);
        self.cursor = prev;
        FormEffect::Changed
    }

    fn delete(&mut self) -> FormEffect {
        let cursor = self.cursor;
        if cursor >= self.field_len() {
            return FormEffect::Ignored;
        }
        let Some(field) = self.field_mut() else {
            return FormEffect::Ignored;
        };
        field.remove(cursor);
        FormEffect::Changed
    }

    fn move_cursor_left(&mut self) -> FormEffect {
        let Some(field) = self.field() else {
            return FormEffect::Ignored;
        };
        let cursor = self.cursor.min(field.len());
        let prev = field[..cursor].char_indices().next_back().map(|(idx, _)| idx);
        match prev {
            Some(idx) => {
                self.cursor = idx;
                FormEffect::Changed
            },
            None => FormEffect::Ignored,
        }
    }

    fn move_cursor_right(&mut self) -> FormEffect {
        let Some(field) = self.field() else {
            return FormEffect::Ignored;
        };
        let cursor = self.cursor.min(field.len());
        let next = field[cursor..].chars().next().map(char::len_utf8);
        match next {
            Some(len) => {
                self.cursor = cursor + len;
                FormEffect::Changed
            },
            None => FormEffect::Ignored,
        }
    }

    fn set_cursor(&mut self, position: usize) -> FormEffect {
        self.cursor = position.min(self.field_len());
        FormEffect::Changed
    }

    fn set_focus(&mut self, focus: FormFocus) -> FormEffect {
        self.focus = focus;
        self.cursor = self.field_len();
        FormEffect::Changed
    }

    fn activate(&mut self) -> FormEffect {
        match self.focus {
            // Enter inside a text field advances the focus, like moving
            // from email to password on a mobile keyboard.
            FormFocus::Email | FormFocus::Password => self.set_focus(self.focus.next()),
            FormFocus::ModeToggle => {
                if self.submitting {
                    return FormEffect::Ignored;
                }
                self.mode = self.mode.toggled();
                FormEffect::Changed
            },
            FormFocus::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> FormEffect {
        if self.submitting {
            return FormEffect::Ignored;
        }

        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return FormEffect::MissingFields;
        }

        self.submitting = true;
        self.generation = self.generation.wrapping_add(1);
        FormEffect::Submitted(SubmitRequest {
            mode: self.mode,
            email: email.to_owned(),
            password: self.password.clone(),
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CredentialForm {
        let mut form = CredentialForm::new();
        for c in "a@b.c".chars() {
            form.handle_key(KeyInput::Char(c));
        }
        form.handle_key(KeyInput::FocusNext);
        for c in "secret".chars() {
            form.handle_key(KeyInput::Char(c));
        }
        form
    }

    fn submit(form: &mut CredentialForm) -> FormEffect {
        while form.focus() != FormFocus::Submit {
            form.handle_key(KeyInput::FocusNext);
        }
        form.handle_key(KeyInput::Enter)
    }

    #[test]
    fn typing_fills_focused_field() {
        let form = filled_form();
        assert_eq!(form.email(), "a@b.c");
        assert_eq!(form.password(), "secret");
    }

    #[test]
    fn backspace_and_cursor_edit_in_place() {
        let mut form = CredentialForm::new();
        for c in "abc".chars() {
            form.handle_key(KeyInput::Char(c));
        }
        form.handle_key(KeyInput::CursorLeft);
        form.handle_key(KeyInput::Backspace);
        assert_eq!(form.email(), "ac");

        form.handle_key(KeyInput::CursorStart);
        form.handle_key(KeyInput::Delete);
        assert_eq!(form.email(), "c");
    }

    #[test]
    fn empty_fields_fail_local_validation() {
        let mut form = CredentialForm::new();
        assert_eq!(submit(&mut form), FormEffect::MissingFields);
        assert!(!form.is_submitting());

        // Whitespace-only email is still missing
        form.handle_key(KeyInput::FocusPrev);
        form.handle_key(KeyInput::FocusPrev); // back to Email
        form.handle_key(KeyInput::Char(' '));
        assert_eq!(submit(&mut form), FormEffect::MissingFields);
    }

    #[test]
    fn valid_submit_trims_email_and_bumps_generation() {
        let mut form = filled_form();
        form.handle_key(KeyInput::FocusPrev); // back to Email
        form.handle_key(KeyInput::CursorEnd);
        form.handle_key(KeyInput::Char(' '));

        let effect = submit(&mut form);
        let FormEffect::Submitted(request) = effect else {
            panic!("expected submission, got {effect:?}");
        };
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.generation, 1);
        assert!(form.is_submitting());
    }

    #[test]
    fn no_concurrent_submissions() {
        let mut form = filled_form();
        assert!(matches!(submit(&mut form), FormEffect::Submitted(_)));
        assert_eq!(form.handle_key(KeyInput::Enter), FormEffect::Ignored);

        // Mode toggle is also locked while submitting
        form.handle_key(KeyInput::FocusNext);
        assert_eq!(form.handle_key(KeyInput::Enter), FormEffect::Ignored);
        assert_eq!(form.mode(), AuthMode::SignIn);
    }

    #[test]
    fn stale_generation_is_rejected() {
        let mut form = filled_form();
        assert!(matches!(submit(&mut form), FormEffect::Submitted(_)));

        assert!(!form.finish_submit(0));
        assert!(form.is_submitting());
        assert!(form.finish_submit(1));
        assert!(!form.is_submitting());
        assert!(!form.finish_submit(1));
    }

    #[test]
    fn failure_preserves_fields_and_mode() {
        let mut form = filled_form();
        form.handle_key(KeyInput::FocusNext);
        form.handle_key(KeyInput::FocusNext); // ModeToggle
        form.handle_key(KeyInput::Enter);
        assert_eq!(form.mode(), AuthMode::SignUp);

        let generation = match submit(&mut form) {
            FormEffect::Submitted(request) => request.generation,
            other => panic!("expected submission, got {other:?}"),
        };
        form.finish_submit(generation);

        assert_eq!(form.email(), "a@b.c");
        assert_eq!(form.password(), "secret");
        assert_eq!(form.mode(), AuthMode::SignUp);
    }

    #[test]
    fn reset_clears_everything_but_generation() {
        let mut form = filled_form();
        assert!(matches!(submit(&mut form), FormEffect::Submitted(_)));

        form.reset();
        assert_eq!(form.email(), "");
        assert_eq!(form.password(), "");
        assert!(!form.is_submitting());
        assert_eq!(form.generation(), 1);
    }
}
