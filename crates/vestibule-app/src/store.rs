//! Session store.
//!
//! Bridges a [`SessionClient`] to the [`crate::App`] state machine. The
//! store owns the single change-stream subscription and translates client
//! results into [`AppEvent`]s; it never interprets them. All session
//! writes flow through the client, so every transition the app sees
//! arrives on exactly one path.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use vestibule_auth::SessionClient;

use crate::{AppAction, AppEvent};

/// Owns the session change subscription for one app instance.
#[derive(Debug)]
pub struct SessionStore<C: SessionClient> {
    client: Arc<C>,
    changes: tokio::sync::broadcast::Receiver<vestibule_auth::SessionChange>,
}

impl<C: SessionClient> SessionStore<C> {
    /// Subscribe to `client` and wrap it for the app runtime.
    pub fn new(client: Arc<C>) -> Self {
        let changes = client.subscribe();
        Self { client, changes }
    }

    /// Handle on the underlying client, for spawned operations.
    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    /// Run the one-time initial session restoration.
    pub async fn initialize(&self) -> AppEvent {
        restore(self.client()).await
    }

    /// Wait for the next session transition.
    ///
    /// Returns `None` once the client drops its sender and no further
    /// transitions can arrive.
    pub async fn next_change(&mut self) -> Option<AppEvent> {
        loop {
            match self.changes.recv().await {
                Ok(change) => return Some(AppEvent::SessionChanged(change)),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Session change stream lagged");
                },
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Run the one-time initial session restoration against the client.
///
/// A failed restoration degrades to "no session"; the app must not stall
/// on a cold cache or an unreachable provider.
pub async fn restore<C: SessionClient>(client: Arc<C>) -> AppEvent {
    let session = match client.get_session().await {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!(%error, "Session restoration failed, starting signed out");
            None
        },
    };
    AppEvent::SessionLoaded { session }
}

/// Execute an auth action against the client.
///
/// Runs on a spawned task; the returned event, if any, is fed back into
/// the app. [`AppAction::Render`] and [`AppAction::Quit`] are handled by
/// the runtime directly and produce nothing here.
pub async fn execute<C: SessionClient>(client: Arc<C>, action: AppAction) -> Option<AppEvent> {
    match action {
        AppAction::SignIn { email, password, generation } => {
            match client.sign_in_with_password(&email, &password).await {
                Ok(_) => Some(AppEvent::SignInSucceeded { generation }),
                Err(error) => {
                    Some(AppEvent::SignInFailed { generation, message: error.to_string() })
                },
            }
        },
        AppAction::SignUp { email, password, generation } => {
            match client.sign_up(&email, &password).await {
                Ok(Some(_)) => {
                    Some(AppEvent::SignUpSucceeded { generation, confirmation_required: false })
                },
                Ok(None) => {
                    Some(AppEvent::SignUpSucceeded { generation, confirmation_required: true })
                },
                Err(error) => {
                    Some(AppEvent::SignUpFailed { generation, message: error.to_string() })
                },
            }
        },
        AppAction::SignOut => match client.sign_out().await {
            Ok(()) => None,
            Err(error) => Some(AppEvent::SignOutFailed { message: error.to_string() }),
        },
        AppAction::Render | AppAction::Quit => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use tokio::sync::broadcast;
    use vestibule_auth::{AuthError, Session, SessionChange};

    use super::*;

    struct FakeClient {
        stored: Option<Session>,
        fail_sign_in: bool,
        events: broadcast::Sender<SessionChange>,
    }

    impl FakeClient {
        fn new() -> Self {
            let (events, _) = broadcast::channel(4);
            Self { stored: None, fail_sign_in: false, events }
        }

        fn session() -> Session {
            Session {
                user_id: "user-1".into(),
                email: "a@example.com".into(),
                access_token: "access".into(),
                refresh_token: "refresh".into(),
                expires_at: Utc::now() + TimeDelta::hours(1),
            }
        }
    }

    impl SessionClient for FakeClient {
        async fn sign_in_with_password(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<Session, AuthError> {
            if self.fail_sign_in {
                return Err(AuthError::provider("Invalid login credentials"));
            }
            let session = Self::session();
            let _ = self.events.send(SessionChange::SignedIn(session.clone()));
            Ok(session)
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<Option<Session>, AuthError> {
            Ok(None)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            let _ = self.events.send(SessionChange::SignedOut);
            Ok(())
        }

        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.stored.clone())
        }

        fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
            self.events.subscribe()
        }
    }

    #[tokio::test]
    async fn initialize_reports_stored_session() {
        let mut client = FakeClient::new();
        client.stored = Some(FakeClient::session());
        let store = SessionStore::new(Arc::new(client));

        let event = store.initialize().await;
        assert!(matches!(event, AppEvent::SessionLoaded { session: Some(_) }));
    }

    #[tokio::test]
    async fn sign_in_completion_and_change_both_arrive() {
        let mut store = SessionStore::new(Arc::new(FakeClient::new()));

        let action =
            AppAction::SignIn { email: "a@b.c".into(), password: "pw".into(), generation: 1 };
        let completion = execute(store.client(), action).await;
        assert!(matches!(completion, Some(AppEvent::SignInSucceeded { generation: 1 })));

        let change = store.next_change().await;
        assert!(matches!(change, Some(AppEvent::SessionChanged(SessionChange::SignedIn(_)))));
    }

    #[tokio::test]
    async fn failed_sign_in_carries_provider_message() {
        let mut client = FakeClient::new();
        client.fail_sign_in = true;
        let store = SessionStore::new(Arc::new(client));

        let action =
            AppAction::SignIn { email: "a@b.c".into(), password: "pw".into(), generation: 3 };
        let event = execute(store.client(), action).await;
        assert!(matches!(
            event,
            Some(AppEvent::SignInFailed { generation: 3, message }) if message == "Invalid login credentials"
        ));
    }

    #[tokio::test]
    async fn sign_up_without_session_requires_confirmation() {
        let store = SessionStore::new(Arc::new(FakeClient::new()));

        let action =
            AppAction::SignUp { email: "a@b.c".into(), password: "pw".into(), generation: 1 };
        let event = execute(store.client(), action).await;
        assert!(matches!(
            event,
            Some(AppEvent::SignUpSucceeded { confirmation_required: true, .. })
        ));
    }

    #[tokio::test]
    async fn sign_out_produces_only_a_stream_change() {
        let mut store = SessionStore::new(Arc::new(FakeClient::new()));

        let completion = execute(store.client(), AppAction::SignOut).await;
        assert!(completion.is_none());

        let change = store.next_change().await;
        assert!(matches!(change, Some(AppEvent::SessionChanged(SessionChange::SignedOut))));
    }

    #[tokio::test]
    async fn lagged_stream_skips_to_newer_changes() {
        let client = Arc::new(FakeClient::new());
        let mut store = SessionStore::new(Arc::clone(&client));

        // Overflow the 4-slot channel so the receiver observes a lag.
        for _ in 0..6 {
            let _ = client.events.send(SessionChange::SignedOut);
        }
        let change = store.next_change().await;
        assert!(matches!(change, Some(AppEvent::SessionChanged(SessionChange::SignedOut))));
    }
}
