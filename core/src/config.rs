//! Client configuration: base URL and default headers.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// Settings fixed at client construction.
///
/// Deserializes from `{"baseURL": "...", "headers": {...}}`; both keys are
/// optional and `base_url` is accepted as an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default, rename = "baseURL", alias = "base_url")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub headers: Headers,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.merge(&headers);
        self
    }

    /// `base_url + url` by plain concatenation; no separator is added or removed.
    pub fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{url}"),
            None => url.to_string(),
        }
    }
}
