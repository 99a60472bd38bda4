//! Request descriptors consumed by [`HttpClient`](super::HttpClient).

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

/// Content type sent with every JSON request unless overridden
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Request payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Serialized JSON text
    Json(String),
    /// Raw bytes
    Binary(Bytes),
}

/// Method, headers and body of a single request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method, GET unless set
    pub method: Method,
    /// Caller-supplied headers
    pub headers: BTreeMap<String, String>,
    /// Request payload
    pub body: RequestBody,
    /// Whether the client may repeat this request on transient failure
    pub retryable: bool,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestDescriptor {
    /// Create a descriptor with no headers and no body
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
            retryable: false,
        }
    }

    /// POST descriptor
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// Add or replace a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add `Authorization: Bearer <token>`
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Serialize `payload` as the JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> serde_json::Result<Self> {
        self.body = RequestBody::Json(serde_json::to_string(payload)?);
        Ok(self)
    }

    /// Mark the request as safe to repeat
    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Headers to send: the JSON content type, overridden case-insensitively
    /// by any caller header of the same name.
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
        for (name, value) in &self.headers {
            merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            merged.push((name.clone(), value.clone()));
        }
        merged
    }
}
