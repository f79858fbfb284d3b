//! Uniform success and failure shapes returned by the client.
//!
//! Both shapes carry the same response metadata plus the request exactly as
//! it was sent. Only the payload differs: `data` on success, `error` on a
//! non-2xx status. Either payload is `None` when the body is absent or not
//! valid JSON.

use serde::de::DeserializeOwned;

use crate::headers::Headers;
use crate::http::HttpRequest;

/// Successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T = serde_json::Value> {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub options: HttpRequest,
    pub data: Option<T>,
}

/// Response with a status outside 200-299, returned inside `FetchError::Status`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub options: HttpRequest,
    pub error: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Drop the metadata and keep the parsed body.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        Envelope {
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            options: self.options,
            data: self.data.map(f),
        }
    }
}

impl ErrorEnvelope {
    /// Decode the error body into a typed value. `None` when there is no body
    /// or it does not match `E`.
    pub fn error_as<E: DeserializeOwned>(&self) -> Option<E> {
        self.error
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:3000/todos/1".to_string(),
            headers: Headers::new(),
            body: None,
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ApiMessage {
        message: String,
    }

    #[test]
    fn error_as_decodes_matching_body() {
        let envelope = ErrorEnvelope {
            status: 404,
            status_text: "Not Found".to_string(),
            headers: Headers::new(),
            options: request(),
            error: Some(json!({"message": "not found"})),
        };
        let message: Option<ApiMessage> = envelope.error_as();
        assert_eq!(
            message,
            Some(ApiMessage {
                message: "not found".to_string()
            })
        );
    }

    #[test]
    fn error_as_is_none_for_mismatched_or_missing_body() {
        let mut envelope = ErrorEnvelope {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            headers: Headers::new(),
            options: request(),
            error: Some(json!([1, 2, 3])),
        };
        assert!(envelope.error_as::<ApiMessage>().is_none());
        envelope.error = None;
        assert!(envelope.error_as::<ApiMessage>().is_none());
    }

    #[test]
    fn map_keeps_metadata() {
        let envelope = Envelope {
            status: 200,
            status_text: "OK".to_string(),
            headers: Headers::from([("X-Id", "1")]),
            options: request(),
            data: Some(2),
        };
        let mapped = envelope.map(|n| n * 10);
        assert_eq!(mapped.status, 200);
        assert_eq!(mapped.headers.get("x-id"), Some("1"));
        assert_eq!(mapped.into_data(), Some(20));
    }
}
