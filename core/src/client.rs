//! Request dispatch pipeline.
//!
//! # Design
//! `Client` holds the configuration, the transport and an optional header
//! interceptor; nothing else is shared between calls. Every verb delegates to
//! `request`, which runs the same steps:
//!
//! 1. resolve the URL against the base URL,
//! 2. merge default and per-call headers, encode the body,
//! 3. run the interceptor on the merged headers,
//! 4. send through the transport,
//! 5. normalize the response into an `Envelope` or an `ErrorEnvelope`.
//!
//! JSON parse failures never turn into errors of their own: on 2xx they yield
//! `data: None`, on other statuses `error: None`.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::body::{self, Body};
use crate::config::ClientConfig;
use crate::envelope::{Envelope, ErrorEnvelope};
use crate::error::{FetchError, Result};
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest};
use crate::interceptor::HeaderInterceptor;
use crate::transport::{Transport, TransportResponse};

#[cfg(feature = "reqwest")]
use crate::transport::ReqwestTransport;

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Headers for this call only; they override the client defaults.
    pub headers: Headers,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.merge(&headers);
        self
    }
}

impl From<Headers> for RequestOptions {
    fn from(headers: Headers) -> Self {
        Self { headers }
    }
}

/// HTTP client with base URL, default headers and a header interceptor.
///
/// Calls are independent and may run concurrently. The interceptor is set
/// through `&mut self`, so it has to be registered before the client is
/// shared between tasks.
#[derive(Clone)]
pub struct Client<T> {
    config: ClientConfig,
    transport: T,
    interceptor: Option<Arc<dyn HeaderInterceptor>>,
}

#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
    /// Client backed by a fresh `reqwest::Client`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            interceptor: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register the header interceptor, replacing any previous one. Applies
    /// to requests issued after this call.
    pub fn interceptor(&mut self, interceptor: impl HeaderInterceptor + 'static) {
        self.interceptor = Some(Arc::new(interceptor));
    }

    pub fn has_interceptor(&self) -> bool {
        self.interceptor.is_some()
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        self.request(HttpMethod::Get, url, Body::Empty, options).await
    }

    pub async fn post<R: DeserializeOwned>(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        self.request(HttpMethod::Post, url, body.into(), options).await
    }

    pub async fn put<R: DeserializeOwned>(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        self.request(HttpMethod::Put, url, body.into(), options).await
    }

    pub async fn patch<R: DeserializeOwned>(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        self.request(HttpMethod::Patch, url, body.into(), options).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        self.request(HttpMethod::Delete, url, Body::Empty, options).await
    }

    /// Send one request and normalize the response.
    ///
    /// Returns `FetchError::Status` for any status outside 200-299. Transport
    /// and interceptor failures are returned as-is and carry no envelope.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Body,
        options: RequestOptions,
    ) -> Result<Envelope<R>> {
        let url = self.config.resolve_url(url);
        let mut headers = Headers::merged(&self.config.headers, &options.headers);
        let body = body::encode(body, &mut headers)?;
        let headers = self.prepare_headers(headers).await?;

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(&request).await?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );

        let success = response.is_success();
        let TransportResponse {
            status,
            status_text,
            headers,
            body,
        } = response;

        if !success {
            return Err(FetchError::from(ErrorEnvelope {
                status,
                status_text,
                headers,
                options: request,
                error: parse_json(&body),
            }));
        }

        Ok(Envelope {
            status,
            status_text,
            headers,
            options: request,
            data: parse_json(&body),
        })
    }

    async fn prepare_headers(&self, merged: Headers) -> Result<Headers> {
        match &self.interceptor {
            Some(interceptor) => interceptor
                .intercept(merged)
                .await
                .map_err(FetchError::Interceptor),
            None => Ok(merged),
        }
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("interceptor", &self.interceptor.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a response body. Empty, non-JSON, mismatched and literal `null`
/// bodies all yield `None`.
fn parse_json<V: DeserializeOwned>(body: &[u8]) -> Option<V> {
    let value = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Null) => {
            trace!("response body is JSON null");
            return None;
        }
        Ok(value) => value,
        Err(e) => {
            trace!(error = %e, len = body.len(), "response body is not JSON");
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!(error = %e, "response body does not match the expected type");
            None
        }
    }
}
