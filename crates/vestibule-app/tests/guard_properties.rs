//! Property-based tests for the navigation guard.
//!
//! Tests verify the routing invariants hold under arbitrary event
//! sequences, not just the scripted flows in the unit tests.

use chrono::{TimeDelta, Utc};
use proptest::prelude::*;
use vestibule_app::{
    App, AppEvent, KeyInput, Route, Screen,
    guard::{self, NavDecision},
};
use vestibule_auth::{Session, SessionChange};

fn session() -> Session {
    Session {
        user_id: "user-1".into(),
        email: "a@example.com".into(),
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        expires_at: Utc::now() + TimeDelta::hours(1),
    }
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        prop::char::range('a', 'z').prop_map(KeyInput::Char),
        Just(KeyInput::Enter),
        Just(KeyInput::Backspace),
        Just(KeyInput::Tab),
        Just(KeyInput::FocusPrev),
        Just(KeyInput::FocusNext),
        Just(KeyInput::CursorLeft),
        Just(KeyInput::CursorRight),
    ]
}

/// Generate random app events, excluding Quit-producing Esc.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        4 => key_strategy().prop_map(AppEvent::Key),
        1 => prop::bool::ANY.prop_map(|has| AppEvent::SessionLoaded {
            session: has.then(session),
        }),
        1 => Just(AppEvent::SessionChanged(SessionChange::SignedIn(session()))),
        1 => Just(AppEvent::SessionChanged(SessionChange::TokenRefreshed(session()))),
        1 => Just(AppEvent::SessionChanged(SessionChange::SignedOut)),
        1 => (0u64..3).prop_map(|generation| AppEvent::SignInSucceeded { generation }),
        1 => (0u64..3).prop_map(|generation| AppEvent::SignInFailed {
            generation,
            message: "Invalid login credentials".into(),
        }),
    ]
}

proptest! {
    /// After any event sequence the rendered screen is consistent with
    /// the session state: protected screens require a session, the entry
    /// screen requires its absence, and splash appears only while loading.
    #[test]
    fn prop_screen_matches_auth_state(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut app = App::new();

        for event in events {
            let _ = app.handle(event);

            match app.screen() {
                Screen::Splash => prop_assert!(app.auth().loading()),
                Screen::Auth => prop_assert!(!app.auth().is_authenticated()),
                Screen::Home | Screen::Profile => {
                    prop_assert!(app.auth().is_authenticated());
                },
            }
        }
    }

    /// The guard decision for the app's own route is never a redirect:
    /// redirects are consumed eagerly inside `handle`.
    #[test]
    fn prop_no_pending_redirect_after_handle(
        events in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let mut app = App::new();

        for event in events {
            let _ = app.handle(event);
            let decision = guard::decide(app.auth(), app.route());
            prop_assert!(matches!(decision, NavDecision::Hold | NavDecision::Render));
        }
    }

    /// Feeding a redirect target back into the guard renders it, so a
    /// redirect can never chain into a loop.
    #[test]
    fn prop_redirects_terminate(
        events in prop::collection::vec(event_strategy(), 0..40),
        route in prop_oneof![Just(Route::Auth), Just(Route::Home), Just(Route::Profile)],
    ) {
        let mut app = App::new();
        for event in events {
            let _ = app.handle(event);
        }

        if let Some(target) = guard::decide(app.auth(), route).target() {
            prop_assert_eq!(guard::decide(app.auth(), target), NavDecision::Render);
        }
    }

    /// Keys pressed before the session resolves never mutate the form.
    #[test]
    fn prop_splash_swallows_input(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let mut app = App::new();

        for key in keys {
            let actions = app.handle(AppEvent::Key(key));
            prop_assert!(actions.is_empty());
        }
        prop_assert_eq!(app.form().email(), "");
        prop_assert_eq!(app.form().password(), "");
    }
}
