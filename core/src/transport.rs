//! The fetch primitive the client is layered on.
//!
//! # Design
//! The client never touches the network itself. It hands a resolved
//! `HttpRequest` to a `Transport` and gets back status, headers and the raw
//! body bytes. Connection handling, TLS and redirects belong to the transport.
//! With the `reqwest` feature, `ReqwestTransport` is the default
//! implementation; tests and embedders can plug in their own.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::headers::Headers;
use crate::http::HttpRequest;

/// A response as returned by the transport, before any body parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one HTTP request and reads the whole response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::multipart;
    use reqwest::Method;

    use super::{Transport, TransportResponse};
    use crate::body::Form;
    use crate::error::TransportError;
    use crate::headers::Headers;
    use crate::http::{HttpMethod, HttpRequest, RequestBody};

    /// `Transport` backed by a `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        inner: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_reqwest(client: reqwest::Client) -> Self {
            Self { inner: client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
            let mut builder = self
                .inner
                .request(method(request.method), &request.url)
                .headers(header_map(&request.headers)?);

            builder = match &request.body {
                Some(RequestBody::Text(text)) => builder.body(text.clone()),
                Some(RequestBody::Multipart(form)) => builder.multipart(multipart_form(form)?),
                None => builder,
            };

            let response = builder.send().await?;
            let status = response.status();
            let headers = response_headers(response.headers());
            let body = response.bytes().await?.to_vec();

            Ok(TransportResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
            })
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidHeader(format!("{name}: {e}")))?;
            map.append(name, value);
        }
        Ok(map)
    }

    /// Copy response headers, keeping every value of repeated names.
    fn response_headers(map: &HeaderMap) -> Headers {
        let mut headers = Headers::new();
        for (name, value) in map {
            if let Ok(value) = value.to_str() {
                headers.append(name.as_str(), value);
            }
        }
        headers
    }

    fn multipart_form(form: &Form) -> Result<multipart::Form, TransportError> {
        let mut out = multipart::Form::new();
        for part in form.parts() {
            let mut piece = multipart::Part::bytes(part.data.clone());
            if let Some(file_name) = &part.file_name {
                piece = piece.file_name(file_name.clone());
            }
            if let Some(mime_type) = &part.mime_type {
                piece = piece.mime_str(mime_type)?;
            }
            out = out.part(part.name.clone(), piece);
        }
        Ok(out)
    }

}
