//! Session client contract.
//!
//! The [`SessionClient`] trait is the fixed boundary to the external
//! identity provider. Implementations provide credential exchange and a
//! change stream while the application stays provider-agnostic.

use std::future::Future;

use tokio::sync::broadcast;

use crate::{AuthError, Session, SessionChange};

/// Contract to the external identity provider.
///
/// # Implementations
///
/// - **HTTP**: [`crate::HttpSessionClient`] speaks the Supabase/GoTrue
///   wire protocol with on-disk session persistence
/// - **In-process**: test doubles and the demo provider keep an in-memory
///   account table for deterministic runs without a backend
///
/// All operations are asynchronous suspension points; callers must stay
/// responsive while a request is outstanding. Every transition after
/// [`SessionClient::get_session`] is delivered through the stream returned
/// by [`SessionClient::subscribe`].
pub trait SessionClient: Send + Sync {
    /// Exchange email + password for a session.
    ///
    /// # Errors
    ///
    /// Returns an error on rejected credentials, unconfirmed email, or
    /// transport failure. A successful exchange also emits
    /// [`SessionChange::SignedIn`] on the change stream.
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// Register a new account.
    ///
    /// Returns `Ok(None)` when the account was created but the provider
    /// requires email confirmation before issuing a usable session.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate account, weak password, or transport
    /// failure.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;

    /// Invalidate the current session.
    ///
    /// The local session is cleared (and [`SessionChange::SignedOut`]
    /// emitted) even when the provider cannot be reached; the error only
    /// reports that the server-side revocation may not have happened.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Current session snapshot, used once at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if restoring a persisted session fails in a way
    /// that is not simply "no session exists".
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;

    /// Subscribe to session transitions.
    ///
    /// The session store holds exactly one subscription for the process
    /// lifetime; no other component may consume this stream.
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;
}
