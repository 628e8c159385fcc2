//! Intent-level keyboard input.

/// Keyboard input, expressed as the intents the form and tab model
/// distinguish rather than raw key codes.
///
/// The terminal layer translates its key events into these at the
/// boundary (arrows become focus/cursor movement), keeping the
/// application crate free of any terminal library and deterministic to
/// drive in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character for the focused text field.
    Char(char),
    /// Activate the focused element.
    Enter,
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character at the cursor.
    Delete,
    /// Cycle form focus, or the authenticated tab set.
    Tab,
    /// Quit.
    Esc,
    /// Focus the next form element (Down arrow).
    FocusNext,
    /// Focus the previous form element (Up arrow).
    FocusPrev,
    /// Move the cursor one character left.
    CursorLeft,
    /// Move the cursor one character right.
    CursorRight,
    /// Move the cursor to the start of the field (Home).
    CursorStart,
    /// Move the cursor to the end of the field (End).
    CursorEnd,
}
