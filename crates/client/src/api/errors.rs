//! API error taxonomy
//!
//! Classifies every transport outcome so callers (principally the poll
//! engine) can decide between continuing to wait and failing fast.

use thiserror::Error;

use anvil_common::auth::AuthError;

/// Errors produced by the API transport
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential exchange failed; fatal, never retried automatically
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Network-level failure (connection refused, DNS, HTTP-layer timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("api returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded into the expected type
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The client was misconfigured (bad base URL, invalid header value)
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether a caller polling in a loop may reasonably retry
    ///
    /// Network failures and server errors (5xx) are transient; auth
    /// failures, client errors (4xx), and decode failures will not heal by
    /// waiting.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Auth(_) | Self::Decode(_) | Self::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
