//! Request client abstraction
//!
//! The contract suite talks to a `RequestClient` and never knows whether a
//! live backend or the in-process stub is answering.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

use super::http::HttpClient;
use super::stub::StubClient;
use crate::common::Result;

/// Response to a single contract request
#[derive(Debug, Clone, PartialEq)]
pub struct ContractResponse {
    /// Decoded JSON object body
    pub body: Map<String, Value>,
    /// HTTP status code (or its stub equivalent)
    pub status: u16,
}

impl ContractResponse {
    /// Build a response from a JSON value; non-object values become an empty body
    pub fn new(body: Value, status: u16) -> Self {
        let body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { body, status }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// String field, if present and not blank
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Body with the status folded in, for failure messages
    pub fn render(&self) -> String {
        let mut shown = self.body.clone();
        shown.insert("status".to_string(), Value::from(self.status));
        Value::Object(shown).to_string()
    }
}

/// Something that can answer contract requests
#[async_trait]
pub trait RequestClient: Send + Sync {
    /// POST `payload` as JSON to `path` (always starting with `/`)
    async fn post(&self, path: &str, payload: &Value) -> Result<ContractResponse>;

    /// Human-readable target, used in progress output
    fn describe(&self) -> String;
}

/// Pick the live backend when a base URL is configured, the stub otherwise
pub fn select_client(base_url: Option<&str>, timeout: Duration) -> Result<Box<dyn RequestClient>> {
    match base_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            tracing::debug!(base_url = url, "using live backend");
            Ok(Box::new(HttpClient::new(url, timeout)?))
        }
        None => {
            tracing::debug!("no base URL configured, using stub backend");
            Ok(Box::new(StubClient))
        }
    }
}
