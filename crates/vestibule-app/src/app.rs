//! Application state machine.
//!
//! The [`App`] manages the interactive state of the application completely
//! decoupled from I/O: it consumes [`AppEvent`] inputs and produces
//! [`AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the [`AuthState`] and applies session events to it.
//! - Applies the navigation guard after every event, rewriting its own
//!   route when the guard redirects (screens never decide routing).
//! - Routes keyboard input to the credential form or the tab set.
//! - Tracks terminal dimensions and the transient status message.

use crate::{
    AppAction, AppEvent, AuthState, CredentialForm, FormEffect, KeyInput, Route, StatusLevel,
    StatusMessage,
    form::AuthMode,
    guard::{self, GuardState, NavDecision},
};
use vestibule_auth::SessionChange;

/// What the shell should put on screen, derived from guard decision and
/// route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Nothing is mounted yet; initialization in progress.
    Splash,
    /// Unauthenticated entry screen (credential form).
    Auth,
    /// Authenticated home tab.
    Home,
    /// Authenticated profile tab.
    Profile,
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Session state driving all routing decisions.
    auth: AuthState,
    /// Current top-level route segment.
    route: Route,
    /// Entry-screen credential form.
    form: CredentialForm,
    /// Whether a change-stream event was applied before the initial
    /// restoration resolved; the stale snapshot must not overwrite it.
    stream_applied: bool,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status: Option<StatusMessage>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App in the initializing state.
    pub fn new() -> Self {
        Self {
            auth: AuthState::initializing(),
            route: Route::Home,
            form: CredentialForm::new(),
            stream_applied: false,
            terminal_size: (80, 24),
            status: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::SessionLoaded { session } => {
                // A change-stream event that raced ahead of the snapshot
                // is newer; keep it and only resolve the loading flag.
                if !self.stream_applied {
                    self.auth.replace(session);
                }
                self.auth.finish_loading();
                self.after_auth_change()
            },
            AppEvent::SessionChanged(change) => {
                self.stream_applied = true;
                match change {
                    SessionChange::SignedIn(session) | SessionChange::TokenRefreshed(session) => {
                        self.auth.replace(Some(session));
                    },
                    SessionChange::SignedOut => self.auth.replace(None),
                }
                self.after_auth_change()
            },
            AppEvent::SignInSucceeded { generation } => {
                // The SignedIn change drives navigation; this only
                // releases the form.
                if !self.form.finish_submit(generation) {
                    return vec![];
                }
                vec![AppAction::Render]
            },
            AppEvent::SignInFailed { generation, message } => {
                if !self.form.finish_submit(generation) {
                    return vec![];
                }
                self.status = Some(StatusMessage::error(message));
                vec![AppAction::Render]
            },
            AppEvent::SignUpSucceeded { generation, confirmation_required } => {
                if !self.form.finish_submit(generation) {
                    return vec![];
                }
                if confirmation_required {
                    self.status = Some(StatusMessage::info(
                        "Check your inbox: verify your email before logging in.",
                    ));
                }
                vec![AppAction::Render]
            },
            AppEvent::SignUpFailed { generation, message } => {
                if !self.form.finish_submit(generation) {
                    return vec![];
                }
                self.status = Some(StatusMessage::error(message));
                vec![AppAction::Render]
            },
            AppEvent::SignOutFailed { message } => {
                tracing::warn!(%message, "Sign-out could not reach the provider");
                self.status = Some(StatusMessage::error(message));
                vec![AppAction::Render]
            },
        }
    }

    /// Session state snapshot.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Current route segment.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Credential form state.
    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    /// Derived guard state for the current inputs.
    pub fn guard_state(&self) -> GuardState {
        guard::classify(&self.auth, self.route)
    }

    /// What the shell should render right now.
    pub fn screen(&self) -> Screen {
        // Redirects are applied eagerly in `handle`, so the decision here
        // is only ever Hold or Render.
        match guard::decide(&self.auth, self.route) {
            NavDecision::Hold => Screen::Splash,
            NavDecision::RedirectToEntry => Screen::Auth,
            NavDecision::RedirectToHome => Screen::Home,
            NavDecision::Render => match self.route {
                Route::Auth => Screen::Auth,
                Route::Home => Screen::Home,
                Route::Profile => Screen::Profile,
            },
        }
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Apply the guard after an auth transition.
    fn after_auth_change(&mut self) -> Vec<AppAction> {
        self.apply_guard();
        vec![AppAction::Render]
    }

    /// Apply the navigation guard's decision to the route.
    fn apply_guard(&mut self) {
        if let Some(target) = guard::decide(&self.auth, self.route).target() {
            tracing::debug!(from = ?self.route, to = ?target, "Navigation guard redirect");
            let leaving_entry = self.route.is_entry();
            self.route = target;
            // Crossing the entry boundary unmounts the form.
            if leaving_entry || target.is_entry() {
                self.form.reset();
            }
            if leaving_entry {
                self.status = None;
            } else if target.is_entry() {
                // Entering the entry screen drops transient notices but
                // keeps errors: a sign-out failure completion may land
                // on either side of the redirect.
                if self.status.as_ref().is_some_and(|m| m.level == StatusLevel::Info) {
                    self.status = None;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == KeyInput::Esc {
            return vec![AppAction::Quit];
        }

        match self.screen() {
            Screen::Splash => vec![],
            Screen::Auth => self.handle_form_key(key),
            Screen::Home | Screen::Profile => self.handle_tab_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match self.form.handle_key(key) {
            FormEffect::Changed => vec![AppAction::Render],
            FormEffect::Ignored => vec![],
            FormEffect::MissingFields => {
                self.status = Some(StatusMessage::error(
                    "Missing fields: please enter your email and password.",
                ));
                vec![AppAction::Render]
            },
            FormEffect::Submitted(request) => {
                self.status = None;
                let action = match request.mode {
                    AuthMode::SignIn => AppAction::SignIn {
                        email: request.email,
                        password: request.password,
                        generation: request.generation,
                    },
                    AuthMode::SignUp => AppAction::SignUp {
                        email: request.email,
                        password: request.password,
                        generation: request.generation,
                    },
                };
                vec![action, AppAction::Render]
            },
        }
    }

    fn handle_tab_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Tab => {
                self.route = self.route.next_tab();
                vec![AppAction::Render]
            },
            KeyInput::Enter if self.route == Route::Profile => {
                self.status = Some(StatusMessage::info("Signing out..."));
                vec![AppAction::SignOut, AppAction::Render]
            },
            _ => vec![],
        }
    }
}
