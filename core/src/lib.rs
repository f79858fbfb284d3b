//! Configurable HTTP client layered on a pluggable fetch primitive.
//!
//! # Overview
//! `Client` adds base-URL resolution, default headers, an asynchronous header
//! interceptor, method-specific body encoding and uniform response shaping
//! on top of a `Transport` that only knows how to send one request.
//!
//! # Design
//! - The transport performs all I/O; the client is deterministic around it
//!   and can be driven by a canned transport in tests.
//! - Bodies are an explicit sum type (`Body::Json`, `Body::Form`,
//!   `Body::Empty`) chosen by the caller.
//! - Success returns `Envelope<T>`; any non-2xx status returns
//!   `FetchError::Status` holding an `ErrorEnvelope` with the same metadata.
//! - The interceptor lives on the client instance, so clients with different
//!   interceptors coexist.
//!
//! # Example
//!
//! ```no_run
//! use fetcher_core::{Client, ClientConfig, RequestOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Todo {
//!     id: u32,
//!     title: String,
//! }
//!
//! async fn example() -> fetcher_core::Result<()> {
//!     let config = ClientConfig::new().with_base_url("https://jsonplaceholder.typicode.com");
//!     let client = Client::new(config);
//!     let envelope = client.get::<Todo>("/todos/1", RequestOptions::new()).await?;
//!     if let Some(todo) = envelope.data {
//!         println!("{} {}", todo.id, todo.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod headers;
pub mod http;
pub mod interceptor;
pub mod transport;

pub use body::{Body, Form, FormPart};
pub use client::{Client, RequestOptions};
pub use config::ClientConfig;
pub use envelope::{Envelope, ErrorEnvelope};
pub use error::{BoxError, FetchError, Result, TransportError};
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, RequestBody};
pub use interceptor::{interceptor_fn, HeaderInterceptor};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{Transport, TransportResponse};
