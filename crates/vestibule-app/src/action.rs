//! Application side-effects and intents.
//!
//! [`AppAction`] is the set of instructions produced by the
//! [`crate::App`] state machine for the runtime to execute. Auth actions
//! are dispatched on spawned tasks; their completions come back as
//! [`crate::AppEvent`]s.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Exchange credentials for a session.
    SignIn {
        /// Trimmed email.
        email: String,
        /// Password, verbatim.
        password: String,
        /// Submission generation for stale-result discard.
        generation: u64,
    },

    /// Register a new account.
    SignUp {
        /// Trimmed email.
        email: String,
        /// Password, verbatim.
        password: String,
        /// Submission generation for stale-result discard.
        generation: u64,
    },

    /// Invalidate the current session.
    SignOut,
}
