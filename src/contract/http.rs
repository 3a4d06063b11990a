//! Live backend client over HTTP

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

use super::client::{ContractResponse, RequestClient};
use crate::common::{Error, Result};

/// Request client that POSTs JSON to a live backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client for `base_url`; every request is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("packcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Describe a request that got no usable response, keeping the cause chain
    fn transport_error(&self, url: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            return Error::http(url, format!("timed out after {:?}", self.timeout));
        }

        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::http(url, message)
    }
}

#[async_trait]
impl RequestClient for HttpClient {
    async fn post(&self, path: &str, payload: &Value) -> Result<ContractResponse> {
        let url = self.url(path);
        tracing::debug!(%url, %payload, "POST");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(&url, e))?;
        tracing::debug!(%url, status = status.as_u16(), body = %text, "response");

        if !status.is_success() {
            let body = if text.is_empty() { "{}" } else { text.as_str() };
            return Err(Error::http_status("POST", &url, status.as_u16(), body));
        }

        let body = if text.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&text).map_err(|e| Error::invalid_response(&url, e))?
        };

        if !body.is_object() {
            return Err(Error::invalid_response(
                &url,
                format!("expected a JSON object, got {}", body),
            ));
        }

        Ok(ContractResponse::new(body, status.as_u16()))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpClient::new("http://localhost:3978/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/conversations"), "http://localhost:3978/conversations");

        let client = HttpClient::new("http://localhost:3978/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url("/tokens/generate"),
            "http://localhost:3978/api/tokens/generate"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_hard_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client =
            HttpClient::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(1)).unwrap();
        let err = client
            .post("/tokens/generate", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
        assert!(!err.to_string().contains("timed out"), "{}", err);
    }
}
