//! MCP Protocol Helpers
//!
//! JSON-RPC envelopes and the tool result shape shared by every tool.

use serde_json::{json, Value};

/// Builds a JSON-RPC 2.0 success response.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// * `id` – the request identifier, or `null` when it could not be read.
/// * `code` – e.g. -32601 for method not found.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Wraps a tool outcome: one text block for the model plus structured data.
pub fn tool_result(text: impl Into<String>, structured: Value) -> Value {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "structuredContent": structured,
    })
}
