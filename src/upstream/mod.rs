//! HTTP client for the GoHighLevel MCP execution endpoint.

use std::time::Duration;

use log::debug;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::{self, GatewayConfig};

/// Which timeout bound an upstream call runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallClass {
    /// Regular tool execution.
    Execute,
    /// Connection test; cheap call, tight bound.
    Probe,
}

/// Machine-checkable classification of a failed forward attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Unauthorized,
    Forbidden,
    UpstreamError,
    TransportError,
}

/// A failed forward attempt: what went wrong, the message shown to callers,
/// the upstream HTTP status when one was received, and the upstream body for
/// debugging.
#[derive(Debug, Clone)]
pub struct CallFailure {
    pub kind: FailureKind,
    pub message: String,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl CallFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::TransportError,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// HTTP status the gateway reports outward for this failure.
    pub fn outward_status(&self) -> u16 {
        match self.kind {
            FailureKind::Timeout => 408,
            FailureKind::Unauthorized => 401,
            FailureKind::Forbidden => 403,
            FailureKind::UpstreamError => self.status.unwrap_or(500),
            FailureKind::TransportError => 500,
        }
    }
}

/// Thin wrapper around one shared `reqwest::Client`. Stateless; safe to call
/// from any number of tasks concurrently.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
    execute_timeout: Duration,
    probe_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.upstream_url.clone(),
            token: config.access_token.clone(),
            execute_timeout: config.execute_timeout,
            probe_timeout: config.probe_timeout,
        }
    }

    fn timeout_for(&self, class: CallClass) -> Duration {
        match class {
            CallClass::Execute => self.execute_timeout,
            CallClass::Probe => self.probe_timeout,
        }
    }

    /// Forward one tool call upstream. Exactly one attempt: timeouts abandon
    /// the pending request at the bound and nothing is retried.
    pub async fn call(
        &self,
        tool: &str,
        input: &Map<String, Value>,
        location_id: &str,
        class: CallClass,
    ) -> Result<Value, CallFailure> {
        let body = json!({ "tool": tool, "input": input });
        debug!("POST {} body {}", self.url, body);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(self.token.as_deref().unwrap_or_default())
            .header("locationId", location_id)
            .header(reqwest::header::ACCEPT, "application/json, text/plain, */*")
            .header(reqwest::header::USER_AGENT, config::USER_AGENT)
            .timeout(self.timeout_for(class))
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| CallFailure::transport(err.to_string()))?;
        let payload = parse_body(&text);

        if status.is_success() {
            return Ok(payload);
        }

        Err(classify_status(status.as_u16(), text, payload))
    }
}

/// Upstream bodies are JSON in the normal case, but error pages and proxies
/// can hand back plain text; carry that through as a JSON string.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn classify_transport(err: reqwest::Error) -> CallFailure {
    if err.is_timeout() {
        return CallFailure {
            kind: FailureKind::Timeout,
            message: "request timed out".to_string(),
            status: None,
            details: None,
        };
    }
    CallFailure::transport(err.to_string())
}

fn classify_status(status: u16, text: String, payload: Value) -> CallFailure {
    let (kind, message) = match status {
        401 => (FailureKind::Unauthorized, "authentication failed".to_string()),
        403 => (FailureKind::Forbidden, "insufficient permissions".to_string()),
        _ => (FailureKind::UpstreamError, upstream_message(status, &text, &payload)),
    };
    CallFailure {
        kind,
        message,
        status: Some(status),
        details: Some(payload),
    }
}

/// Caller-visible message for a non-distinguished upstream failure: the
/// upstream's own `message` field when present, else the raw body, else the
/// status line.
fn upstream_message(status: u16, text: &str, payload: &Value) -> String {
    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("upstream returned HTTP {status}")
}
