//! Application layer for Vestibule
//!
//! Pure state machines for session gating and navigation, decoupled from
//! I/O so the same code runs in the terminal shell and in deterministic
//! tests.
//!
//! # Components
//!
//! - [`App`]: UI state machine (input handling, screen state, status)
//! - [`guard`]: pure navigation guard deciding which screen may render
//! - [`CredentialForm`]: entry-screen form logic (validation, mode toggle)
//! - [`SessionStore`]: owns the session subscription and translates
//!   client results into [`AppEvent`]s

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod event;
mod form;
pub mod guard;
mod input;
mod route;
mod state;
mod store;

pub use action::AppAction;
pub use app::{App, Screen};
pub use event::AppEvent;
pub use form::{AuthMode, CredentialForm, FormEffect, FormFocus, SubmitRequest};
pub use input::KeyInput;
pub use route::Route;
pub use state::{AuthState, StatusLevel, StatusMessage};
pub use store::{SessionStore, execute, restore};
