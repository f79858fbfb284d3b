//! HTTP request types handed to the transport.
//!
//! # Design
//! A request is plain data: the client builds a fully resolved `HttpRequest`
//! and passes it by reference to a `Transport`, which performs the actual
//! I/O. The same value is echoed back to the caller in the envelope's
//! `options` field, so it only uses owned, cloneable types.

use std::fmt;

use crate::body::Form;
use crate::headers::Headers;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded request body, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON text produced by the encoder.
    Text(String),
    /// Multipart form passed through untouched. The transport writes the
    /// boundary and the matching `Content-Type`.
    Multipart(Form),
}

impl RequestBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequestBody::Text(text) => Some(text),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// A fully resolved HTTP request described as plain data.
///
/// `url` is already joined with the configured base URL and `headers` are the
/// final set produced by the header pipeline (interceptor included).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<RequestBody>,
}
