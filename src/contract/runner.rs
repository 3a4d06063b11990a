//! Contract suite runner
//!
//! Drives token issuance, conversation creation and activity posting in
//! order. The first failed assertion ends the run: later steps depend on
//! values produced by earlier ones.

use colored::Colorize;
use serde_json::{json, Value};

use super::client::{ContractResponse, RequestClient};
use super::stub::STATUS_ACCEPTED;
use crate::common::config::ContractConfig;
use crate::common::{Error, Result};

/// Shortest token accepted as a real credential
pub const MIN_TOKEN_LEN: usize = 8;

/// Identities and text used by the probe requests
#[derive(Debug, Clone)]
pub struct SuiteOptions {
    pub user: String,
    pub tenant: String,
    pub text: String,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self::from(&ContractConfig::default())
    }
}

impl From<&ContractConfig> for SuiteOptions {
    fn from(config: &ContractConfig) -> Self {
        Self {
            user: config.user.clone(),
            tenant: config.tenant.clone(),
            text: config.text.clone(),
        }
    }
}

/// Values collected from a passing run
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub target: String,
    pub token: String,
    pub conversation_id: String,
    pub stream_url: String,
    pub activity_id: Option<String>,
}

/// Run the three-step contract suite against `client`
pub async fn run_suite(client: &dyn RequestClient, opts: &SuiteOptions) -> Result<SuiteOutcome> {
    let target = client.describe();
    println!(
        "\n{} {}",
        "Running WebChat contract suite against".blue().bold(),
        target.white().bold()
    );

    let token = report_step(1, "token issuance", check_tokens(client, opts).await)?;
    let (conversation_id, stream_url) = report_step(
        2,
        "conversation creation",
        check_conversation(client, opts).await,
    )?;
    let activity_id = report_step(
        3,
        "activity posting",
        check_activity(client, &conversation_id, opts).await,
    )?;

    println!(
        "\n{} {}\n",
        "✓".green().bold(),
        "webchat.contract: all endpoints verified".green().bold()
    );

    Ok(SuiteOutcome {
        target,
        token,
        conversation_id,
        stream_url,
        activity_id,
    })
}

fn report_step<T>(step_num: usize, description: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => println!("  {} Step {}: {}", "✓".green(), step_num, description.dimmed()),
        Err(e) => println!("  {} Step {}: {}: {}", "✗".red(), step_num, description, e),
    }
    result
}

/// POST /tokens/generate and return the issued token
async fn check_tokens(client: &dyn RequestClient, opts: &SuiteOptions) -> Result<String> {
    let resp = client
        .post("/tokens/generate", &json!({"user": opts.user}))
        .await?;

    let token = resp
        .non_empty_str("token")
        .filter(|t| t.trim().len() >= MIN_TOKEN_LEN)
        .ok_or_else(|| assertion("unexpected token response", &resp))?;
    require_positive_expiry(&resp)?;

    Ok(token.to_string())
}

/// POST /conversations and return (conversationId, streamUrl)
async fn check_conversation(
    client: &dyn RequestClient,
    opts: &SuiteOptions,
) -> Result<(String, String)> {
    let resp = client
        .post("/conversations", &json!({"tenant": opts.tenant}))
        .await?;

    let conversation_id = resp
        .non_empty_str("conversationId")
        .ok_or_else(|| assertion("missing conversationId", &resp))?;
    let stream_url = resp
        .non_empty_str("streamUrl")
        .ok_or_else(|| assertion("streamUrl missing", &resp))?;
    require_positive_expiry(&resp)?;

    Ok((conversation_id.to_string(), stream_url.to_string()))
}

/// POST an activity into the conversation and return its id, if any
async fn check_activity(
    client: &dyn RequestClient,
    conversation_id: &str,
    opts: &SuiteOptions,
) -> Result<Option<String>> {
    let path = format!("/conversations/{}/activities", conversation_id);
    let payload = json!({
        "type": "message",
        "from": {"id": opts.user},
        "text": opts.text,
    });
    let resp = client.post(&path, &payload).await?;

    if resp.get("accepted") != Some(&Value::Bool(true)) {
        return Err(assertion("activity not accepted", &resp));
    }
    if resp.status != STATUS_ACCEPTED {
        return Err(assertion(
            &format!("expected HTTP {}", STATUS_ACCEPTED),
            &resp,
        ));
    }

    Ok(resp.non_empty_str("id").map(String::from))
}

fn require_positive_expiry(resp: &ContractResponse) -> Result<()> {
    let positive = resp
        .get("expires_in")
        .and_then(Value::as_f64)
        .is_some_and(|secs| secs > 0.0);
    if positive {
        Ok(())
    } else {
        Err(assertion("expires_in must be positive", resp))
    }
}

fn assertion(message: &str, resp: &ContractResponse) -> Error {
    Error::ContractAssertion(format!("{} in {}", message, resp.render()))
}
