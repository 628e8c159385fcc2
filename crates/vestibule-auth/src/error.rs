//! Auth error taxonomy.

use thiserror::Error;

/// Errors from session client operations.
///
/// Provider rejections keep the provider's message verbatim so the UI can
/// surface it unchanged. Validation of local input never constructs one of
/// these; it is handled before the client is contacted.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the request (bad credentials, duplicate
    /// signup, invalid token). Message is the provider's own wording.
    #[error("{message}")]
    Provider {
        /// Provider-supplied error description.
        message: String,
    },

    /// Transport failure talking to the provider.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a payload we could not interpret.
    #[error("malformed provider response: {0}")]
    InvalidResponse(String),

    /// Session cache I/O failure.
    #[error("session cache error: {0}")]
    Cache(#[from] std::io::Error),
}

impl AuthError {
    /// Construct a provider rejection from the provider's message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider { message: message.into() }
    }
}
