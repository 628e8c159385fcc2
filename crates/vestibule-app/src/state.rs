//! Observable application state types.
//!
//! [`AuthState`] is the sole input (together with the current route) to
//! all routing decisions. It is owned by the [`crate::App`] and mutated
//! only by session events; every consumer reads immutable snapshots.

use vestibule_auth::Session;

/// The pair (session-or-none, loading flag) driving routing decisions.
///
/// `loading` is true only during the initial session restoration and
/// becomes false exactly once for the process lifetime. While it is true
/// the session must not be trusted for routing.
#[derive(Debug, Clone)]
pub struct AuthState {
    session: Option<Session>,
    loading: bool,
}

impl AuthState {
    /// State before the initial session fetch has completed.
    pub fn initializing() -> Self {
        Self { session: None, loading: true }
    }

    /// State after the initial fetch resolved to `session`.
    pub fn resolved(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }

    /// Current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the initial session restoration is still outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether a trusted session is present.
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.session.is_some()
    }

    /// Complete the initial restoration. Flips `loading` to false; it
    /// never becomes true again.
    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Replace the session wholesale (sign-in, refresh, sign-out).
    pub(crate) fn replace(&mut self, session: Option<Session>) {
        self.session = session;
    }
}

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational notice (e.g. "check your inbox").
    Info,
    /// Blocking user-facing error.
    Error,
}

/// Transient status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity, used for styling only.
    pub level: StatusLevel,
    /// Message text. Provider errors appear verbatim.
    pub text: String,
}

impl StatusMessage {
    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializing_has_no_trusted_session() {
        let state = AuthState::initializing();
        assert!(state.loading());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn loading_flips_false_once() {
        let mut state = AuthState::initializing();
        state.finish_loading();
        assert!(!state.loading());

        state.replace(None);
        assert!(!state.loading());
    }
}
