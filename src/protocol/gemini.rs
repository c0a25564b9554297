//! Gemini function-calling envelope.
//!
//! Gemini expects tool outcomes wrapped as `functionResponse` parts. Errors
//! ride inside the envelope (with HTTP 200 at the transport level) so the
//! model can read them and self-correct instead of the call chain aborting.

use serde_json::{json, Value};

use crate::gateway::ToolCallResult;

/// Function name echoed back when the caller does not supply one.
pub const DEFAULT_FUNCTION_NAME: &str = "ghl_execute";

pub fn function_response(name: &str, result: &ToolCallResult) -> Value {
    let response = match &result.outcome {
        Ok(data) => json!({
            "success": true,
            "tool": result.tool,
            "data": data,
        }),
        Err(failure) => json!({
            "success": false,
            "error": failure.message,
        }),
    };
    envelope(name, response)
}

pub fn function_error(name: &str, message: &str) -> Value {
    envelope(name, json!({ "success": false, "error": message }))
}

fn envelope(name: &str, response: Value) -> Value {
    json!({
        "functionResponse": {
            "name": name,
            "response": response,
        }
    })
}
