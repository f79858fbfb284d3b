//! Error types for the fetch client.
//!
//! # Design
//! A non-2xx response is not a transport problem: it lands in
//! `FetchError::Status` carrying the full `ErrorEnvelope`, so the caller keeps
//! status, headers and the best-effort error body. Transport and interceptor
//! failures are passed through as their source errors because no response
//! exists for them.

use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// Boxed error returned by interceptors and custom transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the client.
pub type Result<T, E = FetchError> = std::result::Result<T, E>;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or no response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The header interceptor failed; nothing was sent.
    #[error("header interceptor failed: {0}")]
    Interceptor(#[source] BoxError),

    /// The server answered with a status outside 200-299.
    #[error("HTTP {} {}", .0.status, .0.status_text)]
    Status(Box<ErrorEnvelope>),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(envelope) => Some(envelope.status),
            _ => None,
        }
    }

    pub fn error_envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            FetchError::Status(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn into_error_envelope(self) -> Option<ErrorEnvelope> {
        match self {
            FetchError::Status(envelope) => Some(*envelope),
            _ => None,
        }
    }
}

impl From<ErrorEnvelope> for FetchError {
    fn from(envelope: ErrorEnvelope) -> Self {
        FetchError::Status(Box::new(envelope))
    }
}

/// Errors raised by a `Transport` before a response is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// A header name or value cannot be put on the wire.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The transport cannot carry this kind of body. `ReqwestTransport`
    /// sends every `RequestBody`; custom transports return this for bodies
    /// they have no encoding for, such as multipart on a text-only stack.
    #[error("unsupported body: {0}")]
    UnsupportedBody(String),

    #[error(transparent)]
    Other(BoxError),
}
