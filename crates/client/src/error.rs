//! Normalized control-plane errors.
//!
//! Resource calls fail with a raw [`EchoError`]; [`parse_echo_error`] is the
//! single place that maps those onto the public [`ErrorCode`] taxonomy.

use echo_types::EchoError;
use regex::Regex;
use std::{fmt, sync::LazyLock};
use thiserror::Error;

static HTTP_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^HTTP (\d+): (.*)$")
        .unwrap_or_else(|e| unreachable!("HTTP message pattern is a valid regex: {e}"))
});

/// Error category exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No response was received.
    Network,
    /// The server answered with this non-success status.
    Http(u16),
    Unknown,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("NETWORK_ERROR"),
            Self::Http(status) => write!(f, "HTTP_{status}"),
            Self::Unknown => f.write_str("UNKNOWN_ERROR"),
        }
    }
}

/// A classified control-plane failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub status_code: Option<u16>,
    /// Path of the endpoint that failed, when known.
    pub endpoint: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.code == ErrorCode::Network
    }
}

/// Classifies a raw error observed at `endpoint`.
///
/// [`EchoError`]s map by variant. Foreign errors map to [`ErrorCode::Network`]
/// when they are I/O failures, to [`ErrorCode::Http`] when their message reads
/// `HTTP <status>: <details>`, and to [`ErrorCode::Unknown`] otherwise.
#[must_use]
pub fn parse_echo_error(
    error: &(dyn std::error::Error + 'static),
    endpoint: Option<&str>,
) -> ApiError {
    let endpoint = endpoint.map(str::to_string);
    match error.downcast_ref::<EchoError>() {
        Some(EchoError::Transport(message)) => network_error(message.clone(), endpoint),
        Some(EchoError::Http { status, body }) => http_error(*status, body, endpoint),
        Some(_) => unknown_error(error.to_string(), endpoint),
        None if error.is::<std::io::Error>() => network_error(error.to_string(), endpoint),
        None => {
            let message = error.to_string();
            if let Some(caps) = HTTP_MESSAGE.captures(&message)
                && let Ok(status) = caps[1].parse::<u16>()
            {
                return http_error(status, &caps[2], endpoint);
            }
            unknown_error(message, endpoint)
        }
    }
}

fn network_error(message: String, endpoint: Option<String>) -> ApiError {
    ApiError {
        code: ErrorCode::Network,
        message,
        status_code: None,
        endpoint,
    }
}

fn unknown_error(message: String, endpoint: Option<String>) -> ApiError {
    ApiError {
        code: ErrorCode::Unknown,
        message,
        status_code: None,
        endpoint,
    }
}

fn http_error(status: u16, details: &str, endpoint: Option<String>) -> ApiError {
    let message = if details.is_empty() {
        format!("HTTP {status}")
    } else {
        details.to_string()
    };
    ApiError {
        code: ErrorCode::Http(status),
        message,
        status_code: Some(status),
        endpoint,
    }
}
