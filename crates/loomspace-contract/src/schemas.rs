// crates/loomspace-contract/src/schemas.rs
// ============================================================================
// Module: Shared Record Schemas
// Description: JSON schemas for domain records and error envelopes.
// Purpose: Provide the component fragments referenced by result schemas and
//          embedded in the OpenAPI document.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Component schemas for the records the gateway returns. Result schemas in
//! [`crate::methods`] reference these via `#/components/schemas/*`; the
//! OpenAPI exporter embeds [`component_schemas`] so those references resolve.

use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Components
// ============================================================================

/// Returns every component schema keyed by component name, in stable order.
#[must_use]
pub fn component_schemas() -> Vec<(&'static str, Value)> {
    vec![
        ("Space", space_schema()),
        ("Page", page_schema()),
        ("Comment", comment_schema()),
        ("Project", project_schema()),
        ("Task", task_schema()),
        ("ApiKey", api_key_schema()),
        ("JsonRpcError", jsonrpc_error_schema()),
    ]
}

/// Returns a `$ref` to a named component schema.
#[must_use]
pub fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// JSON schema for a space record.
#[must_use]
pub fn space_schema() -> Value {
    json!({
        "type": "object",
        "required": ["space_id", "name", "description", "created_at_ms"],
        "properties": {
            "space_id": { "type": "string", "description": "Space identifier." },
            "name": { "type": "string", "description": "Display name." },
            "description": {
                "type": ["null", "string"],
                "description": "Optional description."
            },
            "created_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a page record.
#[must_use]
pub fn page_schema() -> Value {
    json!({
        "type": "object",
        "required": ["page_id", "space_id", "title", "body", "created_at_ms", "updated_at_ms"],
        "properties": {
            "page_id": { "type": "string", "description": "Page identifier." },
            "space_id": { "type": "string", "description": "Owning space identifier." },
            "title": { "type": "string", "description": "Page title." },
            "body": { "type": "string", "description": "Page body (markdown)." },
            "created_at_ms": timestamp_ms_schema(),
            "updated_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a comment record.
#[must_use]
pub fn comment_schema() -> Value {
    json!({
        "type": "object",
        "required": ["comment_id", "page_id", "author_id", "body", "created_at_ms"],
        "properties": {
            "comment_id": { "type": "string", "description": "Comment identifier." },
            "page_id": { "type": "string", "description": "Page the comment is attached to." },
            "author_id": {
                "type": ["null", "string"],
                "description": "Optional author identifier."
            },
            "body": { "type": "string", "description": "Comment body." },
            "created_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a project record.
#[must_use]
pub fn project_schema() -> Value {
    json!({
        "type": "object",
        "required": ["project_id", "space_id", "name", "created_at_ms"],
        "properties": {
            "project_id": { "type": "string", "description": "Project identifier." },
            "space_id": { "type": "string", "description": "Owning space identifier." },
            "name": { "type": "string", "description": "Project name." },
            "created_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a task record.
#[must_use]
pub fn task_schema() -> Value {
    json!({
        "type": "object",
        "required": ["task_id", "project_id", "title", "status", "assignee_id", "created_at_ms"],
        "properties": {
            "task_id": { "type": "string", "description": "Task identifier." },
            "project_id": { "type": "string", "description": "Owning project identifier." },
            "title": { "type": "string", "description": "Task title." },
            "status": task_status_schema(),
            "assignee_id": {
                "type": ["null", "string"],
                "description": "Optional assignee user identifier."
            },
            "created_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a task workflow status.
#[must_use]
pub fn task_status_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["open", "in_progress", "done"],
        "description": "Task workflow status."
    })
}

/// JSON schema for an API key record.
#[must_use]
pub fn api_key_schema() -> Value {
    json!({
        "type": "object",
        "required": ["key_id", "name", "user_id", "workspace_id", "secret", "created_at_ms"],
        "properties": {
            "key_id": { "type": "string", "description": "Key identifier." },
            "name": { "type": "string", "description": "Human-readable key name." },
            "user_id": { "type": "string", "description": "Owning user identifier." },
            "workspace_id": { "type": "string", "description": "Owning workspace identifier." },
            "secret": { "type": "string", "description": "Key secret (hex)." },
            "created_at_ms": timestamp_ms_schema()
        },
        "additionalProperties": false
    })
}

/// JSON schema for a JSON-RPC error object.
#[must_use]
pub fn jsonrpc_error_schema() -> Value {
    json!({
        "type": "object",
        "required": ["code", "message"],
        "properties": {
            "code": { "type": "integer", "description": "JSON-RPC error code." },
            "message": { "type": "string", "description": "Human-readable error message." },
            "data": { "description": "Optional machine-readable detail." }
        },
        "additionalProperties": false
    })
}

/// JSON schema for millisecond timestamps.
#[must_use]
fn timestamp_ms_schema() -> Value {
    json!({
        "type": "integer",
        "description": "Milliseconds since the Unix epoch."
    })
}
