//! Application input events.
//!
//! [`AppEvent`] is the comprehensive set of inputs that drive the
//! [`crate::App`] state machine. Events originate from three sources:
//! user interaction (keys, resize, ticks), the session change stream, and
//! completions of spawned auth operations.

use vestibule_auth::{Session, SessionChange};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The one-time initial session restoration completed.
    SessionLoaded {
        /// Restored session, or `None` (including fetch failure).
        session: Option<Session>,
    },

    /// A transition arrived on the session change stream.
    SessionChanged(SessionChange),

    /// Sign-in request completed successfully. The session itself
    /// arrives separately as a [`SessionChange::SignedIn`].
    SignInSucceeded {
        /// Generation of the submission this result belongs to.
        generation: u64,
    },

    /// Sign-in request was rejected.
    SignInFailed {
        /// Generation of the submission this result belongs to.
        generation: u64,
        /// Provider error, verbatim.
        message: String,
    },

    /// Sign-up request completed successfully.
    SignUpSucceeded {
        /// Generation of the submission this result belongs to.
        generation: u64,
        /// True when the provider requires email confirmation before a
        /// usable session exists.
        confirmation_required: bool,
    },

    /// Sign-up request was rejected.
    SignUpFailed {
        /// Generation of the submission this result belongs to.
        generation: u64,
        /// Provider error, verbatim.
        message: String,
    },

    /// Sign-out could not reach the provider. The local session is
    /// cleared regardless; this only surfaces the failure.
    SignOutFailed {
        /// Provider or transport error, verbatim.
        message: String,
    },
}
