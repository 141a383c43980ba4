//! HTTP-shaped response returned to the CDN edge.
//!
//! Headers are keyed by their lower-case name and hold a list of
//! `{key, value}` entries, which is the shape edge functions must return.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body returned when the page template cannot be loaded.
pub const TEMPLATE_ERROR_BODY: &str = "<h1>Error loading template</h1>";

/// One header value with its canonical casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

/// Response object handed back to the edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EdgeResponse {
    /// Status code as a string, e.g. `"200"`
    pub status: String,

    pub headers: BTreeMap<String, Vec<HeaderEntry>>,

    pub body: String,
}

impl EdgeResponse {
    /// Create an empty response with the given status code.
    pub fn new(status: u16) -> Self {
        Self {
            status: status.to_string(),
            ..Default::default()
        }
    }

    /// Add a header. `key` keeps its casing; the map key is lower-cased.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry {
                key: key.to_string(),
                value: value.to_string(),
            });
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// A `200` HTML page that edge caches must not keep.
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(200)
            .with_header("Content-Type", "text/html")
            .with_header("Cache-Control", "no-cache")
            .with_body(body)
    }

    /// The fixed `500` page returned when the template is unavailable.
    pub fn template_error() -> Self {
        Self::new(500)
            .with_header("Content-Type", "text/html")
            .with_body(TEMPLATE_ERROR_BODY)
    }

    /// First value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}
