// crates/loomspace-contract/src/lib.rs
// ============================================================================
// Module: Loomspace Contract
// Description: Canonical MCP method contracts and schemas.
// Purpose: Provide the single source of truth for dispatch validation, the
//          tool manifest, and the OpenAPI document.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This crate defines the fixed, versioned method surface of the Loomspace
//! MCP gateway. Every method is described once as a [`MethodContract`]
//! (name, description, params schema, result schema); the gateway registry,
//! the tool-schema exporter, and the OpenAPI exporter are all projections of
//! [`methods::method_contracts`]. Nothing else enumerates methods.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod methods;
pub mod schemas;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use methods::method_contracts;
pub use methods::tool_definitions;
pub use types::MethodContract;
pub use types::MethodName;
pub use types::TOOL_MANIFEST_SCHEMA_VERSION;
pub use types::ToolDefinition;
pub use types::ToolFunction;
pub use types::ToolManifest;
