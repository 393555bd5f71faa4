//! Error types for the request gateway.
//!
//! # Design
//! Each failure path of a dispatch maps to one variant. Unauthorized and
//! other non-2xx statuses keep the raw response so callers can inspect it
//! after the user has already been notified. Envelope-level failures inside a
//! 2xx response (a non-success `code`) are not errors at this layer.

use std::fmt;

use thiserror::Error;

use crate::http::HttpResponse;

/// Why the transport produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    /// Local I/O before the request left (e.g. reading an upload file).
    Io,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Io => "io",
            TransportErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// No response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }
}

/// Errors returned by [`crate::Gateway`] dispatches.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP 401. The session has been cleared and the login screen requested.
    #[error("unauthorized")]
    Unauthorized(HttpResponse),

    /// Any other non-2xx status. `message` is what the user was shown.
    #[error("HTTP {}: {message}", response.status)]
    Status { response: HttpResponse, message: String },

    /// No response was received.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx body that is not a `{code, msg, result}` envelope of the expected type.
    #[error("deserialization failed: {message}")]
    Decode { response: HttpResponse, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The caller cancelled the dispatch before it settled.
    #[error("request cancelled")]
    Cancelled,
}

impl GatewayError {
    /// The raw response, when one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            GatewayError::Unauthorized(response)
            | GatewayError::Status { response, .. }
            | GatewayError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Encode(err.to_string())
    }
}
