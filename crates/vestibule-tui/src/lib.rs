//! Terminal UI for Vestibule
//!
//! A thin shell over [`vestibule_app::App`] that provides terminal I/O.
//! All session and routing logic lives in the pure application layer;
//! this crate handles rendering, keyboard conversion, and task plumbing.
//!
//! Runs against a hosted identity provider ([`vestibule_auth::HttpSessionClient`])
//! or against the in-process [`LocalProvider`] for offline use.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod provider;
pub mod runtime;
pub mod terminal;
pub mod ui;

pub use provider::LocalProvider;
pub use runtime::{Runtime, RuntimeError};
pub use terminal::Tui;
pub use vestibule_app::{App, AppAction, AppEvent, KeyInput, Screen};
