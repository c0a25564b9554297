use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{aliases, Catalog, ToolDefinition};
use crate::config::GatewayConfig;
use crate::upstream::{CallClass, CallFailure, UpstreamClient};

/// Tool the connection test exercises; cheap read-only call.
pub const PROBE_TOOL: &str = "locations_get-location";

/// An inbound execution request before validation. Every protocol surface
/// (uniform JSON, Gemini, MCP) deserializes or assembles one of these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub location_id: Option<String>,
}

impl ExecuteRequest {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: Some(tool.into()),
            ..Self::default()
        }
    }
}

/// A validated call, ready to forward: canonical tool name, untyped parameter
/// bag, resolved tenant.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    pub tool: String,
    pub parameters: Map<String, Value>,
    pub location_id: String,
}

/// Outcome of one forward attempt, stamped with a server-side timestamp.
#[derive(Debug, Clone)]
pub struct ToolCallResult {
    pub tool: String,
    pub executed_at: String,
    pub outcome: Result<Value, CallFailure>,
}

impl ToolCallResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Errors raised before any upstream call is attempted. Validation failures
/// never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("Tool '{tool}' not found")]
    UnknownTool { tool: String, available: Vec<String> },
    #[error("Tool '{tool}' is missing required parameters: {}", .missing.join(", "))]
    MissingParameters { tool: String, missing: Vec<String> },
    #[error("GHL access token is not configured")]
    MissingCredential,
}

impl RequestError {
    /// Stable machine-checkable classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::UnknownTool { .. } => "unknown_tool",
            Self::MissingParameters { .. } => "missing_required_parameter",
            Self::MissingCredential => "configuration_missing",
        }
    }

    pub fn outward_status(&self) -> u16 {
        match self {
            Self::MissingCredential => 500,
            _ => 400,
        }
    }
}

/// The tool gateway: one static catalog, one validate→forward pipeline.
/// Holds no mutable state, so a single instance serves unlimited concurrent
/// requests without locking.
pub struct Gateway {
    config: GatewayConfig,
    catalog: Catalog,
    upstream: UpstreamClient,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        let upstream = UpstreamClient::new(&config);
        Self {
            config,
            catalog: Catalog::builtin(),
            upstream,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Check an inbound request against the catalog. On success, hands back
    /// the matched definition and the canonicalized call; the parameter bag
    /// is carried through untouched (presence is checked, values are not).
    pub fn validate(
        &self,
        request: &ExecuteRequest,
    ) -> Result<(&ToolDefinition, ToolCallRequest), RequestError> {
        let tool = request
            .tool
            .as_deref()
            .map(str::trim)
            .filter(|tool| !tool.is_empty())
            .ok_or(RequestError::MissingField { field: "tool" })?;

        let location_id = self
            .resolve_location(request.location_id.as_deref())
            .ok_or(RequestError::MissingField { field: "locationId" })?;

        let tool = aliases::resolve(tool);
        let Some(definition) = self.catalog.get(tool) else {
            return Err(RequestError::UnknownTool {
                tool: tool.to_string(),
                available: self.catalog.names(),
            });
        };

        let parameters = request.parameters.clone().unwrap_or_default();
        let missing: Vec<String> = definition
            .required_params
            .iter()
            .filter(|name| is_missing(parameters.get(name.as_str())))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RequestError::MissingParameters {
                tool: definition.name.clone(),
                missing,
            });
        }

        Ok((
            definition,
            ToolCallRequest {
                tool: definition.name.clone(),
                parameters,
                location_id,
            },
        ))
    }

    /// Forward a validated call upstream. Exactly one attempt; the outcome,
    /// success or failure, is always returned to the caller.
    pub async fn forward(&self, call: &ToolCallRequest, class: CallClass) -> ToolCallResult {
        info!("Executing {} for location {}", call.tool, call.location_id);

        let outcome = self
            .upstream
            .call(&call.tool, &call.parameters, &call.location_id, class)
            .await;

        match &outcome {
            Ok(_) => info!("{} completed", call.tool),
            Err(failure) => warn!("{} failed: {}", call.tool, failure.message),
        }

        ToolCallResult {
            tool: call.tool.clone(),
            executed_at: timestamp(),
            outcome,
        }
    }

    /// The full pipeline: validate, check the credential, forward once.
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ToolCallResult, RequestError> {
        let (_definition, call) = self.validate(request)?;
        self.ensure_credential()?;
        Ok(self.forward(&call, CallClass::Execute).await)
    }

    /// Connection test: run the probe tool under the tighter bound.
    pub async fn probe(&self, location_id: Option<&str>) -> Result<ToolCallResult, RequestError> {
        let location_id = self
            .resolve_location(location_id)
            .ok_or(RequestError::MissingField { field: "locationId" })?;
        self.ensure_credential()?;

        let call = ToolCallRequest {
            tool: PROBE_TOOL.to_string(),
            parameters: Map::new(),
            location_id,
        };
        Ok(self.forward(&call, CallClass::Probe).await)
    }

    /// Tenant policy: the caller's location id wins; the configured default
    /// fills in when the caller omits one. Blank values count as absent on
    /// both sides, so a set-but-empty default never becomes an empty header.
    fn resolve_location(&self, provided: Option<&str>) -> Option<String> {
        non_blank(provided).or_else(|| non_blank(self.config.default_location_id.as_deref()))
    }

    fn ensure_credential(&self) -> Result<(), RequestError> {
        if self.config.has_credential() {
            Ok(())
        } else {
            Err(RequestError::MissingCredential)
        }
    }
}

/// Required parameters must be present and non-empty. The catalog declares
/// names, not value schemas: `0`, `false`, `[]` and `{}` all count as present.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
