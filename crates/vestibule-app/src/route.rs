//! Top-level navigation segments.

/// The closed set of top-level route segments.
///
/// Owned by the navigation layer; the guard reads it, never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Unauthenticated entry segment (credential form).
    Auth,
    /// Authenticated home tab.
    Home,
    /// Authenticated profile tab.
    Profile,
}

impl Route {
    /// Whether this is the unauthenticated entry segment.
    pub fn is_entry(self) -> bool {
        matches!(self, Self::Auth)
    }

    /// Next tab in the authenticated tab set, wrapping around.
    ///
    /// The entry segment has no tabs and maps to itself.
    pub fn next_tab(self) -> Self {
        match self {
            Self::Home => Self::Profile,
            Self::Profile => Self::Home,
            Self::Auth => Self::Auth,
        }
    }

    /// Display title for the segment.
    pub fn title(self) -> &'static str {
        match self {
            Self::Auth => "Sign In",
            Self::Home => "Home",
            Self::Profile => "Profile",
        }
    }
}
