//! Session data model.
//!
//! A [`Session`] is proof of authenticated identity, held for the process
//! lifetime until signed out or invalidated. Sessions are replaced
//! wholesale on every auth event, never partially mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier assigned by the provider.
    pub user_id: String,
    /// Principal identifier (email address).
    pub email: String,
    /// Opaque bearer token for API access.
    pub access_token: String,
    /// Opaque token used to obtain a new access token after expiry.
    pub refresh_token: String,
    /// Instant at which the access token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the access token has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the access token has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// A session transition emitted by the client's change stream.
///
/// This is the single inbound event type the session store consumes;
/// every transition after the initial fetch arrives as one of these.
#[derive(Debug, Clone)]
pub enum SessionChange {
    /// A sign-in produced a usable session.
    SignedIn(Session),
    /// The session's token material was refreshed.
    TokenRefreshed(Session),
    /// The session was cleared (sign-out, invalidation, expiry).
    SignedOut,
}

impl SessionChange {
    /// The session carried by this change. `None` for [`SessionChange::SignedOut`].
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) | Self::TokenRefreshed(session) => Some(session),
            Self::SignedOut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            user_id: "user-1".into(),
            email: "a@example.com".into(),
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
        }
    }

    #[test]
    fn expiry_is_inclusive() {
        let now = Utc::now();
        assert!(session(now).is_expired_at(now));
        assert!(session(now - TimeDelta::seconds(1)).is_expired_at(now));
        assert!(!session(now + TimeDelta::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn change_exposes_session() {
        let s = session(Utc::now());
        assert!(SessionChange::SignedIn(s.clone()).session().is_some());
        assert!(SessionChange::TokenRefreshed(s).session().is_some());
        assert!(SessionChange::SignedOut.session().is_none());
    }

    #[test]
    fn session_serializes_for_cache() {
        let s = session(Utc::now());
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
