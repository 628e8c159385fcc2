//! Async runtime
//!
//! Event loop that drives terminal I/O and feeds the App state machine.
//! Uses tokio::select! to handle terminal events, the session change
//! stream, and completions of spawned auth operations concurrently.
//!
//! Auth operations never block the loop: the app marks the form as
//! submitting, the operation runs on a spawned task, and its result
//! comes back through the completion channel as an ordinary event.

use std::{io, sync::Arc, time::Duration};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use vestibule_app::{App, AppAction, AppEvent, KeyInput, SessionStore, execute, restore};
use vestibule_auth::SessionClient;

use crate::{Tui, ui};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown and the main event loop. Generic over
/// the identity provider so the same loop runs against the hosted
/// provider and the in-process one.
pub struct Runtime<C: SessionClient + 'static> {
    tui: Tui,
    app: App,
    store: SessionStore<C>,
    completion_tx: mpsc::UnboundedSender<AppEvent>,
    completions: mpsc::UnboundedReceiver<AppEvent>,
}

impl<C: SessionClient + 'static> Runtime<C> {
    /// Set up the terminal and wrap `client` for the event loop.
    pub fn new(client: Arc<C>) -> Result<Self, RuntimeError> {
        let tui = Tui::new()?;
        let store = SessionStore::new(client);
        let (completion_tx, completions) = mpsc::unbounded_channel();
        Ok(Self { tui, app: App::new(), store, completion_tx, completions })
    }

    /// Run the main event loop.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;

        // Session restoration runs off the loop so a slow provider
        // cannot freeze input during the splash.
        let restore_client = self.store.client();
        let restore_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let _ = restore_tx.send(restore(restore_client).await);
        });

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

        loop {
            let should_quit = tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event)?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    }
                }

                // Session transitions from the provider
                change = self.store.next_change() => {
                    match change {
                        Some(event) => self.dispatch(event)?,
                        None => {
                            tracing::warn!("Session change stream closed, shutting down");
                            true
                        },
                    }
                }

                // Completions of spawned auth operations
                Some(event) = self.completions.recv() => {
                    self.dispatch(event)?
                }

                // Periodic tick
                _ = tick_interval.tick() => {
                    self.dispatch(AppEvent::Tick)?
                }
            };

            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let app_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match convert_key(key.code) {
                    Some(input) => AppEvent::Key(input),
                    None => return Ok(false),
                }
            },
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => return Ok(false),
        };

        self.dispatch(app_event)
    }

    /// Feed an event through the app and execute the resulting actions.
    /// Returns true if the app requested shutdown.
    fn dispatch(&mut self, event: AppEvent) -> Result<bool, RuntimeError> {
        let actions = self.app.handle(event);

        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
                auth_action @ (AppAction::SignIn { .. }
                | AppAction::SignUp { .. }
                | AppAction::SignOut) => {
                    let client = self.store.client();
                    let tx = self.completion_tx.clone();
                    tokio::spawn(async move {
                        if let Some(completion) = execute(client, auth_action).await {
                            let _ = tx.send(completion);
                        }
                    });
                },
            }
        }
        Ok(false)
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.tui.draw(|frame| {
            ui::render(frame, &self.app);
        })?;
        Ok(())
    }
}

/// Translate a raw crossterm `KeyCode` into the intent it carries here:
/// vertical arrows move form focus, horizontal arrows and Home/End move
/// the cursor.
fn convert_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Down => Some(KeyInput::FocusNext),
        KeyCode::Up => Some(KeyInput::FocusPrev),
        KeyCode::Left => Some(KeyInput::CursorLeft),
        KeyCode::Right => Some(KeyInput::CursorRight),
        KeyCode::Home => Some(KeyInput::CursorStart),
        KeyCode::End => Some(KeyInput::CursorEnd),
        _ => None,
    }
}
