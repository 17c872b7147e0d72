// crates/loomspace-gateway/src/openapi.rs
// ============================================================================
// Module: OpenAPI Export
// Description: Projects registered methods into an OpenAPI 3.0.0 document.
// Purpose: Serve a REST-shaped description of the JSON-RPC surface.
// Dependencies: loomspace-contract, serde_json
// ============================================================================

//! ## Overview
//! Builds the OpenAPI document from the live registry, one path per method
//! with a uniform POST operation. Path keys are the method wire names, so the
//! document and the dispatch table stay in bijection by construction. Request
//! bodies reuse the exact parameter schemas the gateway validates against;
//! result schemas may reference the shared component catalog.

use loomspace_config::OpenApiInfoConfig;
use loomspace_contract::MethodContract;
use loomspace_contract::schemas::component_ref;
use loomspace_contract::schemas::component_schemas;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::registry::MethodRegistry;

// ============================================================================
// SECTION: Document Export
// ============================================================================

/// Builds the OpenAPI 3.0.0 document for every registered method.
#[must_use]
pub fn openapi_document(registry: &MethodRegistry, info: &OpenApiInfoConfig) -> Value {
    let mut paths = Map::new();
    for contract in registry.contracts() {
        paths.insert(contract.name.as_str().to_string(), path_item(contract));
    }
    let mut components = Map::new();
    for (name, schema) in component_schemas() {
        components.insert(name.to_string(), schema);
    }
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": info.title,
            "version": info.version,
        },
        "paths": Value::Object(paths),
        "components": {
            "schemas": Value::Object(components),
        },
    })
}

/// Builds the path item for one method contract.
fn path_item(contract: &MethodContract) -> Value {
    let operation_id = contract.name.as_str().replace('.', "_");
    json!({
        "post": {
            "operationId": operation_id,
            "summary": contract.description,
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": contract.params_schema,
                    },
                },
            },
            "responses": {
                "200": {
                    "description": "JSON-RPC response envelope.",
                    "content": {
                        "application/json": {
                            "schema": response_envelope_schema(&contract.result_schema),
                        },
                    },
                },
            },
        },
    })
}

/// Wraps a result schema in the JSON-RPC response envelope shape.
fn response_envelope_schema(result_schema: &Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "jsonrpc": { "type": "string", "enum": ["2.0"] },
            "id": {},
            "result": result_schema,
            "error": component_ref("JsonRpcError"),
        },
        "required": ["jsonrpc", "id"],
    })
}
