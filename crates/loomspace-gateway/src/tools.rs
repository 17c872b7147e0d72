// crates/loomspace-gateway/src/tools.rs
// ============================================================================
// Module: Tool Manifest Export
// Description: Projects registered methods into a model-facing tool manifest.
// Purpose: Serve the machine-readable tool listing for MCP clients.
// Dependencies: loomspace-contract
// ============================================================================

//! ## Overview
//! Builds the tool manifest from whatever the registry actually dispatches.
//! Parameter schemas are exported verbatim, so the document a model reads is
//! exactly the schema the gateway validates against.

use loomspace_config::ManifestConfig;
use loomspace_contract::TOOL_MANIFEST_SCHEMA_VERSION;
use loomspace_contract::ToolDefinition;
use loomspace_contract::ToolFunction;
use loomspace_contract::ToolManifest;

use crate::registry::MethodRegistry;

// ============================================================================
// SECTION: Manifest Export
// ============================================================================

/// Builds the tool manifest for every method the registry can dispatch.
#[must_use]
pub fn tool_manifest(registry: &MethodRegistry, config: &ManifestConfig) -> ToolManifest {
    let tools = registry
        .contracts()
        .map(|contract| ToolDefinition {
            kind: "function".to_string(),
            function: ToolFunction {
                name: contract.name.as_str().to_string(),
                description: contract.description.clone(),
                parameters: contract.params_schema.clone(),
            },
        })
        .collect();
    ToolManifest {
        schema_version: TOOL_MANIFEST_SCHEMA_VERSION.to_string(),
        name_for_model: config.name_for_model.clone(),
        name_for_human: config.name_for_human.clone(),
        tools,
    }
}
