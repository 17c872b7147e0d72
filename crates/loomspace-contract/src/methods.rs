// crates/loomspace-contract/src/methods.rs
// ============================================================================
// Module: Method Contracts
// Description: Canonical JSON-RPC method contracts for the Loomspace gateway.
// Purpose: Enumerate the fixed method surface once, for registry and exports.
// Dependencies: serde_json, loomspace-contract::schemas, loomspace-contract::types
// ============================================================================

//! ## Overview
//! The canonical method surface. Contract order is intentional: it is
//! preserved in the tool manifest and OpenAPI document to keep diffs stable
//! across releases. Append new methods at the end of their domain block.

use serde_json::Value;
use serde_json::json;

use crate::schemas;
use crate::types::MethodContract;
use crate::types::MethodName;
use crate::types::ToolDefinition;
use crate::types::ToolFunction;

// ============================================================================
// SECTION: Contract Table
// ============================================================================

/// Returns the canonical method contracts in manifest order.
#[must_use]
pub fn method_contracts() -> Vec<MethodContract> {
    vec![
        system_ping_contract(),
        system_info_contract(),
        space_create_contract(),
        space_list_contract(),
        page_create_contract(),
        page_get_contract(),
        page_update_contract(),
        page_delete_contract(),
        page_list_contract(),
        comment_create_contract(),
        comment_list_contract(),
        comment_delete_contract(),
        project_create_contract(),
        project_list_contract(),
        task_create_contract(),
        task_update_contract(),
        task_list_contract(),
    ]
}

/// Projects the contracts into tool-manifest definitions.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let contracts = method_contracts();
    let mut definitions = Vec::with_capacity(contracts.len());
    for contract in contracts {
        definitions.push(ToolDefinition {
            kind: "function".to_string(),
            function: ToolFunction {
                name: contract.name.as_str().to_string(),
                description: contract.description,
                parameters: contract.params_schema,
            },
        });
    }
    definitions
}

// ============================================================================
// SECTION: System Contracts
// ============================================================================

/// Builds the contract for `system.ping`.
fn system_ping_contract() -> MethodContract {
    build_contract(
        MethodName::SystemPing,
        "Liveness probe. Returns a truthy pong payload with the gateway time.",
        params_schema(&json!({}), &[]),
        result_schema(
            &json!({
                "pong": { "type": "boolean", "description": "Always true." },
                "time_ms": { "type": "integer", "description": "Gateway time (ms since epoch)." }
            }),
            &["pong", "time_ms"],
        ),
    )
}

/// Builds the contract for `system.info`.
fn system_info_contract() -> MethodContract {
    build_contract(
        MethodName::SystemInfo,
        "Gateway identity, version, and the registered method names.",
        params_schema(&json!({}), &[]),
        result_schema(
            &json!({
                "name": { "type": "string", "description": "Gateway name." },
                "version": { "type": "string", "description": "Gateway version." },
                "methods": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Registered method names in manifest order."
                }
            }),
            &["name", "version", "methods"],
        ),
    )
}

// ============================================================================
// SECTION: Space Contracts
// ============================================================================

/// Builds the contract for `space.create`.
fn space_create_contract() -> MethodContract {
    build_contract(
        MethodName::SpaceCreate,
        "Create a space. Space names are unique; duplicates are rejected.",
        params_schema(
            &json!({
                "name": schema_name("Space display name."),
                "description": { "type": "string", "description": "Optional description." }
            }),
            &["name"],
        ),
        result_schema(&json!({ "space": schemas::component_ref("Space") }), &["space"]),
    )
}

/// Builds the contract for `space.list`.
fn space_list_contract() -> MethodContract {
    build_contract(
        MethodName::SpaceList,
        "List all spaces.",
        params_schema(&json!({}), &[]),
        result_schema(
            &json!({
                "spaces": { "type": "array", "items": schemas::component_ref("Space") }
            }),
            &["spaces"],
        ),
    )
}

// ============================================================================
// SECTION: Page Contracts
// ============================================================================

/// Builds the contract for `page.create`.
fn page_create_contract() -> MethodContract {
    build_contract(
        MethodName::PageCreate,
        "Create a page in a space.",
        params_schema(
            &json!({
                "space_id": schema_identifier("Owning space identifier."),
                "title": schema_name("Page title."),
                "body": { "type": "string", "description": "Page body (markdown)." }
            }),
            &["space_id", "title"],
        ),
        result_schema(&json!({ "page": schemas::component_ref("Page") }), &["page"]),
    )
}

/// Builds the contract for `page.get`.
fn page_get_contract() -> MethodContract {
    build_contract(
        MethodName::PageGet,
        "Fetch a page by identifier.",
        params_schema(
            &json!({ "page_id": schema_identifier("Page identifier.") }),
            &["page_id"],
        ),
        result_schema(&json!({ "page": schemas::component_ref("Page") }), &["page"]),
    )
}

/// Builds the contract for `page.update`.
fn page_update_contract() -> MethodContract {
    build_contract(
        MethodName::PageUpdate,
        "Apply a partial update to a page. Omitted fields are unchanged.",
        params_schema(
            &json!({
                "page_id": schema_identifier("Page identifier."),
                "title": schema_name("Replacement title."),
                "body": { "type": "string", "description": "Replacement body." }
            }),
            &["page_id"],
        ),
        result_schema(&json!({ "page": schemas::component_ref("Page") }), &["page"]),
    )
}

/// Builds the contract for `page.delete`.
fn page_delete_contract() -> MethodContract {
    build_contract(
        MethodName::PageDelete,
        "Delete a page and its comments.",
        params_schema(
            &json!({ "page_id": schema_identifier("Page identifier.") }),
            &["page_id"],
        ),
        result_schema(
            &json!({
                "deleted": { "type": "boolean", "description": "Always true on success." },
                "page_id": schema_identifier("Deleted page identifier.")
            }),
            &["deleted", "page_id"],
        ),
    )
}

/// Builds the contract for `page.list`.
fn page_list_contract() -> MethodContract {
    build_contract(
        MethodName::PageList,
        "List pages in a space, newest-capped by limit.",
        params_schema(
            &json!({
                "space_id": schema_identifier("Owning space identifier."),
                "limit": schema_limit()
            }),
            &["space_id"],
        ),
        result_schema(
            &json!({
                "pages": { "type": "array", "items": schemas::component_ref("Page") }
            }),
            &["pages"],
        ),
    )
}

// ============================================================================
// SECTION: Comment Contracts
// ============================================================================

/// Builds the contract for `comment.create`.
fn comment_create_contract() -> MethodContract {
    build_contract(
        MethodName::CommentCreate,
        "Attach a comment to a page.",
        params_schema(
            &json!({
                "page_id": schema_identifier("Page identifier."),
                "body": schema_name("Comment body."),
                "author_id": { "type": "string", "description": "Optional author identifier." }
            }),
            &["page_id", "body"],
        ),
        result_schema(&json!({ "comment": schemas::component_ref("Comment") }), &["comment"]),
    )
}

/// Builds the contract for `comment.list`.
fn comment_list_contract() -> MethodContract {
    build_contract(
        MethodName::CommentList,
        "List comments on a page in creation order.",
        params_schema(
            &json!({ "page_id": schema_identifier("Page identifier.") }),
            &["page_id"],
        ),
        result_schema(
            &json!({
                "comments": { "type": "array", "items": schemas::component_ref("Comment") }
            }),
            &["comments"],
        ),
    )
}

/// Builds the contract for `comment.delete`.
fn comment_delete_contract() -> MethodContract {
    build_contract(
        MethodName::CommentDelete,
        "Delete a comment.",
        params_schema(
            &json!({ "comment_id": schema_identifier("Comment identifier.") }),
            &["comment_id"],
        ),
        result_schema(
            &json!({
                "deleted": { "type": "boolean", "description": "Always true on success." },
                "comment_id": schema_identifier("Deleted comment identifier.")
            }),
            &["deleted", "comment_id"],
        ),
    )
}

// ============================================================================
// SECTION: Project Contracts
// ============================================================================

/// Builds the contract for `project.create`.
fn project_create_contract() -> MethodContract {
    build_contract(
        MethodName::ProjectCreate,
        "Create a project in a space.",
        params_schema(
            &json!({
                "space_id": schema_identifier("Owning space identifier."),
                "name": schema_name("Project name.")
            }),
            &["space_id", "name"],
        ),
        result_schema(&json!({ "project": schemas::component_ref("Project") }), &["project"]),
    )
}

/// Builds the contract for `project.list`.
fn project_list_contract() -> MethodContract {
    build_contract(
        MethodName::ProjectList,
        "List projects, optionally scoped to a space.",
        params_schema(
            &json!({ "space_id": schema_identifier("Optional space scope.") }),
            &[],
        ),
        result_schema(
            &json!({
                "projects": { "type": "array", "items": schemas::component_ref("Project") }
            }),
            &["projects"],
        ),
    )
}

// ============================================================================
// SECTION: Task Contracts
// ============================================================================

/// Builds the contract for `task.create`.
fn task_create_contract() -> MethodContract {
    build_contract(
        MethodName::TaskCreate,
        "Create a task in a project. New tasks start in the open status.",
        params_schema(
            &json!({
                "project_id": schema_identifier("Owning project identifier."),
                "title": schema_name("Task title."),
                "assignee_id": { "type": "string", "description": "Optional assignee." }
            }),
            &["project_id", "title"],
        ),
        result_schema(&json!({ "task": schemas::component_ref("Task") }), &["task"]),
    )
}

/// Builds the contract for `task.update`.
fn task_update_contract() -> MethodContract {
    build_contract(
        MethodName::TaskUpdate,
        "Apply a partial update to a task. Omitted fields are unchanged.",
        params_schema(
            &json!({
                "task_id": schema_identifier("Task identifier."),
                "title": schema_name("Replacement title."),
                "status": schemas::task_status_schema(),
                "assignee_id": { "type": "string", "description": "Replacement assignee." }
            }),
            &["task_id"],
        ),
        result_schema(&json!({ "task": schemas::component_ref("Task") }), &["task"]),
    )
}

/// Builds the contract for `task.list`.
fn task_list_contract() -> MethodContract {
    build_contract(
        MethodName::TaskList,
        "List tasks in a project in creation order.",
        params_schema(
            &json!({ "project_id": schema_identifier("Owning project identifier.") }),
            &["project_id"],
        ),
        result_schema(
            &json!({
                "tasks": { "type": "array", "items": schemas::component_ref("Task") }
            }),
            &["tasks"],
        ),
    )
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a method contract from its parts.
#[must_use]
fn build_contract(
    name: MethodName,
    description: &str,
    params_schema: Value,
    result_schema: Value,
) -> MethodContract {
    MethodContract {
        name,
        description: description.to_string(),
        params_schema,
        result_schema,
    }
}

/// Builds a standard params schema wrapper with a `$schema` header.
#[must_use]
fn params_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds a standard result schema wrapper.
#[must_use]
fn result_schema(properties: &Value, required: &[&str]) -> Value {
    object_schema(properties, required)
}

/// Builds an object schema without the top-level `$schema` annotation.
#[must_use]
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "required": required_values,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Adds a `$schema` header to a top-level JSON schema.
#[must_use]
fn with_schema(schema: Value) -> Value {
    let Value::Object(mut map) = schema else {
        return schema;
    };
    map.insert(
        String::from("$schema"),
        Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
    );
    Value::Object(map)
}

/// Returns a schema describing identifiers.
#[must_use]
fn schema_identifier(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}

/// Returns a schema describing non-empty display strings.
#[must_use]
fn schema_name(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}

/// Returns the schema for list page limits.
#[must_use]
fn schema_limit() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 1000,
        "description": "Maximum number of records to return."
    })
}

#[cfg(test)]
mod tests;
