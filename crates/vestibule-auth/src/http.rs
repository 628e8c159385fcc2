//! Supabase/GoTrue HTTP adapter.
//!
//! Speaks the identity provider's auth endpoints (`/auth/v1/*`) and keeps
//! the current session in memory plus the on-disk [`SessionCache`] so a
//! restart can restore it. Every transition is emitted on the change
//! stream; consumers never poll.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::{AuthError, Session, SessionCache, SessionChange, client::SessionClient};

/// Capacity of the change broadcast. Session state is replace-wholesale,
/// so a lagging receiver that skips to the newest event stays correct.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Fallback token lifetime when the provider sends neither `expires_at`
/// nor `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// HTTP session client for a Supabase/GoTrue-style identity provider.
pub struct HttpSessionClient {
    http: reqwest::Client,
    api_url: String,
    anon_key: String,
    cache: SessionCache,
    current: Mutex<Option<Session>>,
    events: broadcast::Sender<SessionChange>,
}

/// Successful token grant payload (password grant, refresh, confirmed
/// signup).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: WireUser,
}

/// User record embedded in provider responses.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: Option<String>,
}

/// Provider error body. GoTrue uses several shapes depending on endpoint.
#[derive(Debug, Deserialize)]
struct WireError {
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

impl HttpSessionClient {
    /// Create a client for the given project URL and anonymous API key.
    ///
    /// `api_url` is the project base URL (e.g. `https://xyz.supabase.co`).
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>, cache: SessionCache) -> Self {
        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
            cache,
            current: Mutex::new(None),
            events,
        }
    }

    /// Build the auth API URL for an endpoint.
    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, endpoint)
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Extract the provider's error message from a failed response.
    async fn provider_error(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<WireError>(&body)
            .ok()
            .and_then(|e| e.error_description.or(e.msg).or(e.error))
            .unwrap_or_else(|| format!("authentication request failed ({status})"));
        AuthError::Provider { message }
    }

    /// Convert a token grant into a [`Session`].
    fn session_from_token(token: TokenResponse, now: DateTime<Utc>) -> Session {
        let expires_at = token
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| {
                now + TimeDelta::seconds(token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
            });

        Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_default(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
        }
    }

    /// Install a session as current, persist it, and emit the change.
    fn install_session(&self, session: Session, change: fn(Session) -> SessionChange) {
        if let Err(e) = self.cache.store(&session) {
            tracing::warn!(error = %e, "Failed to persist session; continuing in-memory");
        }
        *self.lock_current() = Some(session.clone());
        let _ = self.events.send(change(session));
    }

    /// Clear the current session locally and emit `SignedOut`.
    fn clear_session(&self) {
        if let Err(e) = self.cache.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        *self.lock_current() = None;
        let _ = self.events.send(SessionChange::SignedOut);
    }

    /// Exchange a refresh token for fresh token material.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let url = self.auth_url("token?grant_type=refresh_token");
        tracing::debug!("Refreshing session");

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let token: TokenResponse =
            response.json().await.map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        let session = Self::session_from_token(token, Utc::now());
        self.install_session(session.clone(), SessionChange::TokenRefreshed);
        Ok(session)
    }
}

impl SessionClient for HttpSessionClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let url = self.auth_url("token?grant_type=password");
        tracing::debug!("Signing in with password grant");

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let token: TokenResponse =
            response.json().await.map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        let session = Self::session_from_token(token, Utc::now());
        self.install_session(session.clone(), SessionChange::SignedIn);

        tracing::info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        let url = self.auth_url("signup");
        tracing::debug!("Signing up");

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let body = response.text().await?;

        // With email confirmation disabled the provider returns a full
        // token grant; otherwise just the pending user record.
        if let Ok(token) = serde_json::from_str::<TokenResponse>(&body) {
            let session = Self::session_from_token(token, Utc::now());
            self.install_session(session.clone(), SessionChange::SignedIn);
            tracing::info!(user_id = %session.user_id, "Signed up with immediate session");
            return Ok(Some(session));
        }

        match serde_json::from_str::<WireUser>(&body) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Signed up; confirmation pending");
                Ok(None)
            },
            Err(e) => Err(AuthError::InvalidResponse(e.to_string())),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let session = self.lock_current().take();
        let Some(session) = session else {
            return Ok(());
        };

        // Local state is cleared before the revocation call; a transport
        // failure must still leave the process logged out.
        self.clear_session();

        let url = self.auth_url("logout");
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        tracing::info!("Signed out");
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let session = match self.lock_current().clone() {
            Some(session) => Some(session),
            None => self.cache.load()?,
        };

        let Some(session) = session else {
            return Ok(None);
        };

        if !session.is_expired() {
            *self.lock_current() = Some(session.clone());
            return Ok(Some(session));
        }

        // Expired restore: try the refresh token, degrade to logged-out.
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(e) => {
                tracing::warn!(error = %e, "Persisted session could not be refreshed");
                self.clear_session();
                Ok(None)
            },
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> (tempfile::TempDir, HttpSessionClient) {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        // Discard port; any request fails fast without a live provider.
        let client = HttpSessionClient::new("http://127.0.0.1:9", "anon-key", cache);
        (dir, client)
    }

    fn token(expires_at: Option<i64>, expires_in: Option<i64>) -> TokenResponse {
        TokenResponse {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_in,
            expires_at,
            user: WireUser { id: "user-1".into(), email: Some("a@example.com".into()) },
        }
    }

    #[test]
    fn auth_url_targets_auth_service() {
        let (_dir, client) = client();
        assert_eq!(client.auth_url("signup"), "http://127.0.0.1:9/auth/v1/signup");
    }

    #[test]
    fn token_expiry_prefers_absolute_timestamp() {
        let now = Utc::now();
        let absolute = (now + TimeDelta::hours(2)).timestamp();
        let session = HttpSessionClient::session_from_token(token(Some(absolute), Some(60)), now);
        assert_eq!(session.expires_at.timestamp(), absolute);
    }

    #[test]
    fn token_expiry_falls_back_to_relative() {
        let now = Utc::now();
        let session = HttpSessionClient::session_from_token(token(None, Some(120)), now);
        assert_eq!(session.expires_at, now + TimeDelta::seconds(120));
    }

    #[test]
    fn provider_error_shapes_parse() {
        let shapes = [
            (r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#, "Invalid login credentials"),
            (r#"{"code":422,"msg":"User already registered"}"#, "User already registered"),
            (r#"{"error":"access_denied"}"#, "access_denied"),
        ];
        for (body, expected) in shapes {
            let parsed: WireError = serde_json::from_str(body).unwrap();
            let message = parsed.error_description.or(parsed.msg).or(parsed.error);
            assert_eq!(message.as_deref(), Some(expected));
        }
    }

    #[tokio::test]
    async fn install_session_persists_and_emits() {
        let (_dir, client) = client();
        let mut changes = client.subscribe();

        let now = Utc::now();
        let session = HttpSessionClient::session_from_token(token(None, Some(3600)), now);
        client.install_session(session.clone(), SessionChange::SignedIn);

        assert!(matches!(changes.try_recv(), Ok(SessionChange::SignedIn(s)) if s == session));
        assert_eq!(client.get_session().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn sign_out_clears_local_session_despite_transport_failure() {
        let (_dir, client) = client();
        let mut changes = client.subscribe();

        let session = HttpSessionClient::session_from_token(token(None, Some(3600)), Utc::now());
        client.install_session(session, SessionChange::SignedIn);
        let _ = changes.try_recv();

        // Revocation cannot reach a provider; the error is reported, but
        // the process still converges to logged-out.
        assert!(client.sign_out().await.is_err());
        assert!(matches!(changes.try_recv(), Ok(SessionChange::SignedOut)));
        assert!(client.get_session().await.unwrap().is_none());
        assert!(client.cache.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_no_op() {
        let (_dir, client) = client();
        let mut changes = client.subscribe();

        client.sign_out().await.unwrap();
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn expired_restore_degrades_to_logged_out() {
        let (_dir, client) = client();

        let mut expired = HttpSessionClient::session_from_token(token(None, None), Utc::now());
        expired.expires_at = Utc::now() - TimeDelta::hours(1);
        client.cache.store(&expired).unwrap();

        // Refresh cannot reach a provider; restore degrades to None.
        assert!(client.get_session().await.unwrap().is_none());
        assert!(client.cache.load().unwrap().is_none());
    }
}
