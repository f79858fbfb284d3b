//! Caller-facing request bodies and the encoder that turns them into wire bodies.
//!
//! # Design
//! The caller states the body kind explicitly through `Body`, so the encoder
//! never inspects the value at runtime. JSON bodies become JSON text and get
//! `Content-Type: application/json` unless one was supplied. Multipart forms
//! are passed through and any `Content-Type` is dropped so the transport can
//! write its own boundary header.

use serde::Serialize;

use crate::error::FetchError;
use crate::headers::{Headers, APPLICATION_JSON, CONTENT_TYPE};
use crate::http::RequestBody;

/// Body supplied to `post`, `put` and `patch`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Form(Form),
    #[default]
    Empty,
}

impl Body {
    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, FetchError> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<Form> for Body {
    fn from(form: Form) -> Self {
        Body::Form(form)
    }
}

/// A multipart form: an ordered list of text fields and file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    parts: Vec<FormPart>,
}

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: None,
            mime_type: None,
            data: value.into().into_bytes(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            mime_type: Some(mime_type.into()),
            data: data.into(),
        });
        self
    }

    pub fn part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Encode `body` for the wire, adjusting `headers` for its content type.
pub(crate) fn encode(body: Body, headers: &mut Headers) -> Result<Option<RequestBody>, FetchError> {
    match body {
        Body::Json(value) => {
            let text = serde_json::to_string(&value)?;
            if !headers.contains(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, APPLICATION_JSON);
            }
            Ok(Some(RequestBody::Text(text)))
        }
        Body::Form(form) => {
            headers.remove(CONTENT_TYPE);
            Ok(Some(RequestBody::Multipart(form)))
        }
        Body::Empty => Ok(None),
    }
}
