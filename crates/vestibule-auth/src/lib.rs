//! Session client layer for Vestibule
//!
//! Defines the contract to the external identity provider and the data
//! model for authenticated sessions. The rest of the application only ever
//! talks to the provider through the [`SessionClient`] trait; everything
//! behind it (wire protocol, token storage, refresh) is this crate's
//! concern.
//!
//! # Components
//!
//! - [`Session`] / [`SessionChange`]: proof of authenticated identity and
//!   the event type for all session transitions
//! - [`SessionClient`]: the provider contract (sign in/up/out, session
//!   fetch, change subscription)
//! - [`HttpSessionClient`]: Supabase/GoTrue-style HTTP adapter
//! - [`SessionCache`]: on-disk session persistence for startup restore

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod client;
mod error;
mod http;
mod session;

pub use cache::SessionCache;
pub use client::SessionClient;
pub use error::AuthError;
pub use http::HttpSessionClient;
pub use session::{Session, SessionChange};
