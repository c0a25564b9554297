use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::{ExecuteRequest, RequestError, ToolCallResult, PROBE_TOOL};
use crate::protocol::{gemini, mcp};
use crate::upstream::CallFailure;

use super::state::AppState;

/// GET /health: process liveness, no upstream involvement.
pub async fn service_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "toolCount": state.gateway.catalog().len(),
        "timestamp": timestamp(),
    }))
}

/// GET /api/ghl/health: bridge status including whether a credential is
/// configured. Never calls upstream.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "configured": state.gateway.config().has_credential(),
        "availableTools": state.gateway.catalog().len(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": timestamp(),
    }))
}

/// GET /api/ghl/tools: the catalog with required/optional parameter lists.
pub async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.gateway.catalog();
    let tools: Vec<_> = catalog.iter().collect();
    Json(json!({
        "success": true,
        "tools": tools,
        "totalTools": catalog.len(),
        "ghlMcpUrl": state.gateway.config().upstream_url,
        "timestamp": timestamp(),
    }))
}

/// POST /tools/list: the catalog as MCP tool schemas.
pub async fn tools_list(State(state): State<AppState>) -> Json<Value> {
    let tools: Vec<mcp::Tool> = state.gateway.catalog().iter().map(mcp::Tool::from).collect();
    Json(json!({ "tools": tools }))
}

/// POST /api/ghl/execute: validate, forward once, translate.
pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> (StatusCode, Json<Value>) {
    match state.gateway.execute(&request).await {
        Ok(result) => execution_envelope(result),
        Err(error) => request_error_envelope(&error),
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    #[serde(default)]
    pub location_id: Option<String>,
}

/// POST /api/ghl/test: probe the upstream with a cheap read-only call.
pub async fn test_connection(
    State(state): State<AppState>,
    body: Option<Json<TestRequest>>,
) -> (StatusCode, Json<Value>) {
    let location_id = body.and_then(|Json(request)| request.location_id);
    match state.gateway.probe(location_id.as_deref()).await {
        Ok(result) => match result.outcome {
            Ok(data) => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Connection to GHL MCP successful",
                    "testTool": PROBE_TOOL,
                    "ghlResponse": data,
                    "timestamp": result.executed_at,
                })),
            ),
            Err(failure) => failure_envelope(PROBE_TOOL, &failure),
        },
        Err(error) => request_error_envelope(&error),
    }
}

#[derive(Deserialize)]
pub struct GeminiExecuteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub request: ExecuteRequest,
}

/// POST /api/gemini/execute: same pipeline, function-response envelope.
/// Always HTTP 200 so the model reads failures instead of the call chain
/// aborting on a transport error.
pub async fn gemini_execute(
    State(state): State<AppState>,
    Json(body): Json<GeminiExecuteRequest>,
) -> Json<Value> {
    let name = body
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(gemini::DEFAULT_FUNCTION_NAME);
    match state.gateway.execute(&body.request).await {
        Ok(result) => Json(gemini::function_response(name, &result)),
        Err(error) => Json(gemini::function_error(name, &error.to_string())),
    }
}

/// POST /mcp: JSON-RPC 2.0 endpoint for MCP clients.
pub async fn mcp_rpc(State(state): State<AppState>, Json(request): Json<mcp::RpcRequest>) -> Response {
    match request.method.as_str() {
        "initialize" => rpc_result(request.id, mcp::initialize_result()),
        "notifications/initialized" => StatusCode::ACCEPTED.into_response(),
        "tools/list" => {
            let tools: Vec<mcp::Tool> =
                state.gateway.catalog().iter().map(mcp::Tool::from).collect();
            rpc_result(request.id, json!({ "tools": tools }))
        }
        "tools/call" => tools_call(&state, request).await,
        _ => rpc_error(request.id, mcp::RpcError::method_not_found(&request.method)),
    }
}

async fn tools_call(state: &AppState, request: mcp::RpcRequest) -> Response {
    let Some(params) = request.params.as_object() else {
        return rpc_error(
            request.id,
            mcp::RpcError::invalid_params("params must be an object"),
        );
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return rpc_error(
            request.id,
            mcp::RpcError::invalid_params("params.name must be a string"),
        );
    };

    let mut arguments = params
        .get("arguments")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    // The tenant addresses the account, not the tool: lift it out of the bag.
    let location_id = arguments
        .remove("locationId")
        .and_then(|value| value.as_str().map(str::to_string));

    let execute = ExecuteRequest {
        tool: Some(name.to_string()),
        parameters: Some(arguments),
        location_id,
    };

    // Tool-level failures ride back as results with isError so the client
    // shows them to the model; only malformed params are JSON-RPC errors.
    let result = match state.gateway.execute(&execute).await {
        Ok(result) => match result.outcome {
            Ok(data) => mcp::CallToolResult::text(pretty(&data)),
            Err(failure) => mcp::CallToolResult::error(failure.message),
        },
        Err(error) => mcp::CallToolResult::error(request_error_text(&error)),
    };
    rpc_result(request.id, json!(result))
}

fn rpc_result(id: Value, result: Value) -> Response {
    Json(mcp::RpcResponse::result(id, result)).into_response()
}

fn rpc_error(id: Value, error: mcp::RpcError) -> Response {
    Json(mcp::RpcResponse::error(id, error)).into_response()
}

fn execution_envelope(result: ToolCallResult) -> (StatusCode, Json<Value>) {
    match result.outcome {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "tool": result.tool,
                "data": data,
                "executedAt": result.executed_at,
            })),
        ),
        Err(failure) => failure_envelope(&result.tool, &failure),
    }
}

fn failure_envelope(tool: &str, failure: &CallFailure) -> (StatusCode, Json<Value>) {
    let status = failure.outward_status();
    let mut body = json!({
        "success": false,
        "tool": tool,
        "error": {
            "code": failure.kind,
            "message": failure.message,
            "statusCode": status,
        },
        "timestamp": timestamp(),
    });
    if let Some(details) = &failure.details {
        body["details"] = details.clone();
    }
    (outward_status(status), Json(body))
}

fn request_error_envelope(error: &RequestError) -> (StatusCode, Json<Value>) {
    let status = error.outward_status();
    let mut body = json!({
        "success": false,
        "error": {
            "code": error.code(),
            "message": error.to_string(),
            "statusCode": status,
        },
        "timestamp": timestamp(),
    });
    match error {
        RequestError::UnknownTool { available, .. } => {
            body["availableTools"] = json!(available);
        }
        RequestError::MissingParameters { missing, .. } => {
            body["missingParams"] = json!(missing);
        }
        _ => {}
    }
    (outward_status(status), Json(body))
}

/// Errors surfaced through MCP keep enough context for the model to retry.
fn request_error_text(error: &RequestError) -> String {
    match error {
        RequestError::UnknownTool { available, .. } => {
            format!("{error}. Available tools: {}", available.join(", "))
        }
        _ => error.to_string(),
    }
}

fn pretty(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

fn outward_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
