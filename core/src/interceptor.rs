//! Asynchronous header interception hook.
//!
//! # Design
//! The interceptor receives an owned copy of the merged headers and returns
//! the set that goes on the wire. Its result is used as-is: an interceptor
//! that wants to keep the merged entries must return them. It is shared
//! between in-flight requests, so implementations must be `Send + Sync` and
//! tolerate concurrent calls.

use std::future::{ready, Future, Ready};

use async_trait::async_trait;

use crate::error::BoxError;
use crate::headers::Headers;

/// Hook that rewrites the final header set of every request.
#[async_trait]
pub trait HeaderInterceptor: Send + Sync {
    async fn intercept(&self, headers: Headers) -> Result<Headers, BoxError>;
}

#[async_trait]
impl<F, Fut> HeaderInterceptor for F
where
    F: Fn(Headers) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Headers, BoxError>> + Send + 'static,
{
    async fn intercept(&self, headers: Headers) -> Result<Headers, BoxError> {
        (self)(headers).await
    }
}

/// Adapt a synchronous closure into a `HeaderInterceptor`.
pub fn interceptor_fn<F>(f: F) -> impl HeaderInterceptor
where
    F: Fn(Headers) -> Result<Headers, BoxError> + Send + Sync,
{
    move |headers: Headers| -> Ready<Result<Headers, BoxError>> { ready(f(headers)) }
}
