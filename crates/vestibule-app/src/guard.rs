//! Navigation guard.
//!
//! A pure decision function mapping ([`AuthState`], [`Route`]) to what may
//! render. Re-evaluated on every change to either input; performs no I/O
//! and cannot fail. The UI layer translates the decision into an actual
//! navigation side effect at the boundary.

use crate::{AuthState, Route};

/// Derived guard state. Never stored; classified fresh on every
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Initial session restoration still outstanding.
    Initializing,
    /// No session present.
    Unauthenticated,
    /// Session present while parked on the entry segment.
    AuthenticatedAtEntry,
    /// Session present on an authenticated segment.
    AuthenticatedElsewhere,
}

/// Routing decision for the current (auth state, route) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    /// Render nothing; initialization has not finished.
    Hold,
    /// Navigate to the unauthenticated entry segment.
    RedirectToEntry,
    /// Navigate to the authenticated home segment.
    RedirectToHome,
    /// Render the requested segment unchanged.
    Render,
}

impl NavDecision {
    /// Redirect target, if this decision navigates.
    pub fn target(self) -> Option<Route> {
        match self {
            Self::RedirectToEntry => Some(Route::Auth),
            Self::RedirectToHome => Some(Route::Home),
            Self::Hold | Self::Render => None,
        }
    }
}

/// Classify the current pair into a [`GuardState`].
pub fn classify(auth: &AuthState, route: Route) -> GuardState {
    if auth.loading() {
        GuardState::Initializing
    } else if auth.session().is_none() {
        GuardState::Unauthenticated
    } else if route.is_entry() {
        GuardState::AuthenticatedAtEntry
    } else {
        GuardState::AuthenticatedElsewhere
    }
}

/// Decide what may render for the current pair.
///
/// Redirects are idempotent: feeding a decision's target route back in
/// yields [`NavDecision::Render`], so no redirect loops are possible.
pub fn decide(auth: &AuthState, route: Route) -> NavDecision {
    match classify(auth, route) {
        GuardState::Initializing => NavDecision::Hold,
        GuardState::Unauthenticated => {
            if route.is_entry() {
                NavDecision::Render
            } else {
                NavDecision::RedirectToEntry
            }
        },
        GuardState::AuthenticatedAtEntry => NavDecision::RedirectToHome,
        GuardState::AuthenticatedElsewhere => NavDecision::Render,
    }
}
