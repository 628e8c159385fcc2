//! In-process identity provider.
//!
//! Stand-in for a hosted provider when no `--url` is given. Keeps
//! accounts in memory for the lifetime of the process and mirrors the
//! hosted provider's observable behavior, including its error messages,
//! so flows exercised offline carry over unchanged.

use std::{
    collections::HashMap,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{TimeDelta, Utc};
use tokio::sync::broadcast;
use vestibule_auth::{AuthError, Session, SessionChange, SessionClient};

const CHANGE_CHANNEL_CAPACITY: usize = 16;
const MIN_PASSWORD_LEN: usize = 6;
const TOKEN_LIFETIME_HOURS: i64 = 1;

/// In-memory identity provider for offline use.
pub struct LocalProvider {
    accounts: Mutex<HashMap<String, String>>,
    next_user: AtomicU64,
    events: broadcast::Sender<SessionChange>,
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalProvider {
    /// Create a provider with no registered accounts.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { accounts: Mutex::new(HashMap::new()), next_user: AtomicU64::new(1), events }
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue_session(&self, email: &str) -> Session {
        let id = self.next_user.fetch_add(1, Ordering::Relaxed);
        Session {
            user_id: format!("local-{id}"),
            email: email.to_owned(),
            access_token: format!("local-access-{id}"),
            refresh_token: format!("local-refresh-{id}"),
            expires_at: Utc::now() + TimeDelta::hours(TOKEN_LIFETIME_HOURS),
        }
    }
}

impl SessionClient for LocalProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let known = self.lock_accounts().get(email).is_some_and(|stored| stored == password);
        if !known {
            return Err(AuthError::provider("Invalid login credentials"));
        }

        let session = self.issue_session(email);
        let _ = self.events.send(SessionChange::SignedIn(session.clone()));
        tracing::info!(email, "Local sign-in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::provider(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        {
            let mut accounts = self.lock_accounts();
            if accounts.contains_key(email) {
                return Err(AuthError::provider("User already registered"));
            }
            accounts.insert(email.to_owned(), password.to_owned());
        }

        // No email confirmation locally; the session is usable at once.
        let session = self.issue_session(email);
        let _ = self.events.send(SessionChange::SignedIn(session.clone()));
        tracing::info!(email, "Local sign-up");
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let _ = self.events.send(SessionChange::SignedOut);
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        // Nothing persists across runs.
        Ok(None)
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.events.subscribe()
    }
}
