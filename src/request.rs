//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully read and its path
/// parameters resolved by the router.
pub struct Request {
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(body: Bytes, params: HashMap<String, String>) -> Self {
        Self { body, params }
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/v1/reviews/update/{id}`, `req.param("id")` on
    /// `/v1/reviews/update/r1` returns `Some("r1")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deserialises the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
