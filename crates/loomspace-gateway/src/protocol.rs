// crates/loomspace-gateway/src/protocol.rs
// ============================================================================
// Module: JSON-RPC Protocol
// Description: Envelope types, error codes, and the request validator.
// Purpose: Turn untrusted JSON bodies into validated requests or -32600s.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! JSON-RPC 2.0 envelope handling. [`validate_envelope`] is a pure function:
//! it checks object shape, protocol version, and method name, and passes
//! `params`/`id` through untouched. Per-method params validation happens in
//! the dispatcher because each method declares its own schema.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Malformed envelope (wrong version, non-object body, bad method field).
pub const INVALID_REQUEST: i64 = -32600;
/// Method absent from the registry.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Params failed the method's declared schema.
pub const INVALID_PARAMS: i64 = -32602;
/// Unexpected internal failure; detail is audited, never returned.
pub const INTERNAL_ERROR: i64 = -32603;
/// Domain: referenced record does not exist.
pub const DOMAIN_NOT_FOUND: i64 = -32004;
/// Domain: input violates a business rule.
pub const DOMAIN_VALIDATION: i64 = -32005;
/// Domain: operation conflicts with existing state.
pub const DOMAIN_CONFLICT: i64 = -32009;
/// Domain: backing store rejected the operation.
pub const DOMAIN_STORAGE: i64 = -32010;
/// Request body exceeded the configured size limit.
pub const PAYLOAD_TOO_LARGE: i64 = -32070;

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// A validated JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonRpcRequest {
    /// Method name (non-empty, dot-namespaced by convention).
    pub method: String,
    /// Raw parameters payload; schema-checked per method at dispatch.
    pub params: Option<Value>,
    /// Request identifier; `Null` when the caller omitted it.
    pub id: Value,
}

/// JSON-RPC response envelope.
///
/// # Invariants
/// - Exactly one of `result`/`error` is serialized.
/// - `id` echoes the request identifier unchanged, `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    pub jsonrpc: String,
    /// Echoed request identifier.
    pub id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a success envelope.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error envelope.
    #[must_use]
    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Returns the error code when this is an error envelope.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|error| error.code)
    }
}

/// JSON-RPC error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional machine-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// ============================================================================
// SECTION: Envelope Validation
// ============================================================================

/// Validates the JSON-RPC envelope shape of a parsed body.
///
/// Checks, in order: the body is an object (arrays belong to the batch
/// path), `jsonrpc` equals `"2.0"`, and `method` is a non-empty string.
///
/// # Errors
///
/// Returns the `-32600` error envelope to send back, with the request `id`
/// echoed when one could be read.
pub fn validate_envelope(body: &Value) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let Value::Object(fields) = body else {
        return Err(JsonRpcResponse::failure(
            Value::Null,
            INVALID_REQUEST,
            "request body must be a JSON object",
        ));
    };
    let id = fields.get("id").cloned().unwrap_or(Value::Null);
    if fields.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Err(JsonRpcResponse::failure(id, INVALID_REQUEST, "invalid JSON-RPC version"));
    }
    let method = match fields.get("method").and_then(Value::as_str) {
        Some(method) if !method.is_empty() => method.to_string(),
        _ => {
            return Err(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "method must be a non-empty string",
            ));
        }
    };
    Ok(JsonRpcRequest {
        method,
        params: fields.get("params").cloned(),
        id,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_well_formed_request() {
        let body = json!({"jsonrpc": "2.0", "method": "system.ping", "params": {}, "id": "t1"});
        let request = validate_envelope(&body).expect("valid envelope");
        assert_eq!(request.method, "system.ping");
        assert_eq!(request.id, json!("t1"));
    }

    #[test]
    fn missing_id_becomes_null() {
        let body = json!({"jsonrpc": "2.0", "method": "system.ping"});
        let request = validate_envelope(&body).expect("valid envelope");
        assert_eq!(request.id, Value::Null);
    }

    #[test]
    fn rejects_non_object_body() {
        let response = validate_envelope(&json!([1, 2])).expect_err("array rejected");
        assert_eq!(response.error_code(), Some(INVALID_REQUEST));
        assert_eq!(response.id, Value::Null);
    }

    #[test]
    fn rejects_missing_version_with_id_echo() {
        let body = json!({"method": "system.ping", "id": 7});
        let response = validate_envelope(&body).expect_err("version required");
        assert_eq!(response.error_code(), Some(INVALID_REQUEST));
        assert_eq!(response.id, json!(7));
    }

    #[test]
    fn rejects_wrong_version() {
        let body = json!({"jsonrpc": "1.0", "method": "system.ping", "id": 1});
        let response = validate_envelope(&body).expect_err("wrong version rejected");
        assert_eq!(response.error_code(), Some(INVALID_REQUEST));
    }

    #[test]
    fn rejects_empty_method() {
        let body = json!({"jsonrpc": "2.0", "method": "", "id": 1});
        let response = validate_envelope(&body).expect_err("empty method rejected");
        assert_eq!(response.error_code(), Some(INVALID_REQUEST));
    }

    #[test]
    fn rejects_non_string_method() {
        let body = json!({"jsonrpc": "2.0", "method": 42, "id": 1});
        let response = validate_envelope(&body).expect_err("non-string method rejected");
        assert_eq!(response.error_code(), Some(INVALID_REQUEST));
    }

    #[test]
    fn success_envelope_serializes_without_error_field() {
        let response = JsonRpcResponse::success(json!("t1"), json!({"pong": true}));
        let rendered = serde_json::to_value(&response).expect("serializes");
        assert!(rendered.get("error").is_none());
        assert!(rendered.get("result").is_some());
    }

    #[test]
    fn failure_envelope_serializes_without_result_field() {
        let response = JsonRpcResponse::failure(Value::Null, INTERNAL_ERROR, "internal error");
        let rendered = serde_json::to_value(&response).expect("serializes");
        assert!(rendered.get("result").is_none());
        assert!(rendered.get("error").is_some());
    }
}
