//! Deterministic in-process backend
//!
//! Answers the three contract endpoints with fixed shapes so the suite runs
//! offline. The same path and payload always produce the same response.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::{ContractResponse, RequestClient};
use crate::common::Result;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ACCEPTED: u16 = 202;
pub const STATUS_NOT_FOUND: u16 = 404;

/// Stub-side answer for `path`, as (body, status)
pub fn simulate(path: &str, payload: &Value) -> (Value, u16) {
    match path {
        "/tokens/generate" => {
            let audience = non_empty(payload, "user").unwrap_or("anonymous");
            (
                json!({
                    "token": format!("mock-token-for-{}", audience),
                    "expires_in": 3600,
                }),
                STATUS_OK,
            )
        }
        "/conversations" => {
            let tenant = non_empty(payload, "tenant").unwrap_or("default");
            (
                json!({
                    "conversationId": format!("conv-{}-001", tenant),
                    "expires_in": 1800,
                    "streamUrl": "wss://stub.greentic.ai/conversations/conv-001",
                }),
                STATUS_OK,
            )
        }
        _ if is_activities_path(path) => (
            json!({
                "id": "activity-001",
                "type": payload.get("type").cloned().unwrap_or_else(|| json!("message")),
                "accepted": true,
            }),
            STATUS_ACCEPTED,
        ),
        _ => (json!({"error": "not found"}), STATUS_NOT_FOUND),
    }
}

/// `/conversations/{id}/activities` with a non-empty id
fn is_activities_path(path: &str) -> bool {
    path.strip_prefix("/conversations/")
        .and_then(|rest| rest.strip_suffix("/activities"))
        .is_some_and(|id| !id.is_empty())
}

fn non_empty<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Request client backed by [`simulate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StubClient;

#[async_trait]
impl RequestClient for StubClient {
    async fn post(&self, path: &str, payload: &Value) -> Result<ContractResponse> {
        let (body, status) = simulate(path, payload);
        tracing::debug!(path, status, "stub response");
        Ok(ContractResponse::new(body, status))
    }

    fn describe(&self) -> String {
        "in-process stub backend".to_string()
    }
}
