//! Unified error type for the echo workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across echo crates.
#[derive(Debug, Error)]
pub enum EchoError {
    /// The configured app id is missing or not a UUID v4.
    #[error(
        "{context}: invalid app_id {app_id:?}; expected a UUID v4 \
         (xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx)"
    )]
    InvalidAppId { context: String, app_id: String },

    /// The underlying transport failed before a response existed.
    #[error("network error: {0}")]
    Transport(String),

    /// A control-plane request returned a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Token acquisition or refresh failure.
    #[error("authentication error: {0}")]
    Auth(String),

    /// A provider client did not accept the injected fetch.
    #[error("dependency error: {0}")]
    Dependency(String),

    /// The outgoing request could not be built (bad URL, header, method).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<http::Error> for EchoError {
    fn from(e: http::Error) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

impl EchoError {
    /// Returns `true` if the error came from the transport rather than from
    /// an HTTP response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EchoError>;
