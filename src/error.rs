use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by every client in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected locally, before any request was sent.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The client could not be built (missing key, missing base URL, unreadable rc file).
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection, DNS or protocol failure below HTTP status handling.
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured timeout elapsed before the round trip completed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with anything other than HTTP 200.
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: ErrorBody },

    /// HTTP 200 with a body that is not the expected JSON.
    #[error("failed to decode API response (status={status}): {reason}")]
    Decode { status: u16, reason: String },
}

impl Error {
    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } | Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether resending the same request may succeed. No retry is performed by the clients.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout(_))
    }
}

/// Best-effort decoded body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub(crate) fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }

    /// The `detail` or `message` field some endpoints put in their error payloads.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(value) => value
                .get("detail")
                .or_else(|| value.get("message"))
                .and_then(Value::as_str),
            ErrorBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{}", value),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}
