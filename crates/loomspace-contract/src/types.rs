// crates/loomspace-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Method names, contracts, and tool-manifest shapes.
// Purpose: Define the stable identifiers shared by registry and exporters.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`MethodName`] is the closed enumeration of dot-namespaced JSON-RPC
//! methods. [`MethodContract`] carries the method's description and its
//! params/result schemas. [`ToolManifest`] is the function-calling projection
//! served to LLM-style tool callers.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Tool manifest schema version served at the tools endpoint.
pub const TOOL_MANIFEST_SCHEMA_VERSION: &str = "1.0";

// ============================================================================
// SECTION: Method Names
// ============================================================================

/// Fully-qualified JSON-RPC method names (`domain.action`).
///
/// # Invariants
/// - Variant order matches [`crate::methods::method_contracts`] and is
///   preserved in generated manifests to keep diffs stable. Append new
///   methods at the end of their domain block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MethodName {
    /// Liveness probe.
    #[serde(rename = "system.ping")]
    SystemPing,
    /// Gateway identity and method inventory.
    #[serde(rename = "system.info")]
    SystemInfo,
    /// Create a space.
    #[serde(rename = "space.create")]
    SpaceCreate,
    /// List spaces.
    #[serde(rename = "space.list")]
    SpaceList,
    /// Create a page.
    #[serde(rename = "page.create")]
    PageCreate,
    /// Fetch a page.
    #[serde(rename = "page.get")]
    PageGet,
    /// Update a page.
    #[serde(rename = "page.update")]
    PageUpdate,
    /// Delete a page.
    #[serde(rename = "page.delete")]
    PageDelete,
    /// List pages in a space.
    #[serde(rename = "page.list")]
    PageList,
    /// Create a comment.
    #[serde(rename = "comment.create")]
    CommentCreate,
    /// List comments on a page.
    #[serde(rename = "comment.list")]
    CommentList,
    /// Delete a comment.
    #[serde(rename = "comment.delete")]
    CommentDelete,
    /// Create a project.
    #[serde(rename = "project.create")]
    ProjectCreate,
    /// List projects.
    #[serde(rename = "project.list")]
    ProjectList,
    /// Create a task.
    #[serde(rename = "task.create")]
    TaskCreate,
    /// Update a task.
    #[serde(rename = "task.update")]
    TaskUpdate,
    /// List tasks in a project.
    #[serde(rename = "task.list")]
    TaskList,
}

impl MethodName {
    /// Returns the wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemPing => "system.ping",
            Self::SystemInfo => "system.info",
            Self::SpaceCreate => "space.create",
            Self::SpaceList => "space.list",
            Self::PageCreate => "page.create",
            Self::PageGet => "page.get",
            Self::PageUpdate => "page.update",
            Self::PageDelete => "page.delete",
            Self::PageList => "page.list",
            Self::CommentCreate => "comment.create",
            Self::CommentList => "comment.list",
            Self::CommentDelete => "comment.delete",
            Self::ProjectCreate => "project.create",
            Self::ProjectList => "project.list",
            Self::TaskCreate => "task.create",
            Self::TaskUpdate => "task.update",
            Self::TaskList => "task.list",
        }
    }

    /// Parses a wire name into a method, if registered.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|method| method.as_str() == name)
    }

    /// Returns every method in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SystemPing,
            Self::SystemInfo,
            Self::SpaceCreate,
            Self::SpaceList,
            Self::PageCreate,
            Self::PageGet,
            Self::PageUpdate,
            Self::PageDelete,
            Self::PageList,
            Self::CommentCreate,
            Self::CommentList,
            Self::CommentDelete,
            Self::ProjectCreate,
            Self::ProjectList,
            Self::TaskCreate,
            Self::TaskUpdate,
            Self::TaskList,
        ]
    }
}

// ============================================================================
// SECTION: Method Contract
// ============================================================================

/// Canonical description of one JSON-RPC method.
///
/// # Invariants
/// - `params_schema` is a self-contained JSON Schema (no external `$ref`)
///   because it is compiled for dispatch validation and exported verbatim to
///   the tool manifest.
/// - `result_schema` may reference `#/components/schemas/*` fragments, which
///   only the OpenAPI exporter resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodContract {
    /// Method name.
    pub name: MethodName,
    /// Human-readable description.
    pub description: String,
    /// JSON schema for the `params` payload.
    pub params_schema: Value,
    /// JSON schema for the `result` payload.
    pub result_schema: Value,
}

// ============================================================================
// SECTION: Tool Manifest
// ============================================================================

/// Function-calling manifest served to tool callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolManifest {
    /// Manifest schema version.
    pub schema_version: String,
    /// Machine-facing gateway name.
    pub name_for_model: String,
    /// Human-facing gateway name.
    pub name_for_human: String,
    /// One tool per registered method.
    pub tools: Vec<ToolDefinition>,
}

/// One callable tool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool kind; always `function`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Function payload.
    pub function: ToolFunction,
}

/// Function payload of a tool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// Method wire name.
    pub name: String,
    /// Method description.
    pub description: String,
    /// Params schema, verbatim from the method contract.
    pub parameters: Value,
}
