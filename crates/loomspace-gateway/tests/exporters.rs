//! Exporter integration tests for loomspace-gateway.
// crates/loomspace-gateway/tests/exporters.rs
// ============================================================================
// Module: Exporter Integration Tests
// Description: Tool-manifest and OpenAPI projections of the live registry.
// Purpose: Verify both exporters stay in bijection with dispatch.
// Dependencies: loomspace-contract, loomspace-gateway, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

mod common;

use std::collections::BTreeSet;

use loomspace_config::ManifestConfig;
use loomspace_config::OpenApiInfoConfig;
use loomspace_contract::MethodName;
use loomspace_gateway::openapi_document;
use loomspace_gateway::tool_manifest;

use crate::common::test_registry;

#[test]
fn tool_manifest_covers_every_registered_method() {
    let registry = test_registry();
    let manifest = tool_manifest(&registry, &ManifestConfig::default());
    assert_eq!(manifest.schema_version, "1.0");
    assert!(!manifest.tools.is_empty());
    let listed: BTreeSet<&str> =
        manifest.tools.iter().map(|tool| tool.function.name.as_str()).collect();
    let registered: BTreeSet<&str> =
        MethodName::all().iter().map(|name| name.as_str()).collect();
    assert_eq!(listed, registered);
}

#[test]
fn tool_parameters_match_dispatch_schemas_verbatim() {
    let registry = test_registry();
    let manifest = tool_manifest(&registry, &ManifestConfig::default());
    for (tool, contract) in manifest.tools.iter().zip(registry.contracts()) {
        assert_eq!(tool.function.name, contract.name.as_str());
        assert_eq!(tool.function.parameters, contract.params_schema);
        assert_eq!(tool.kind, "function");
        assert!(!tool.function.description.is_empty());
    }
}

#[test]
fn openapi_paths_are_in_bijection_with_methods() {
    let registry = test_registry();
    let document = openapi_document(&registry, &OpenApiInfoConfig::default());
    assert_eq!(document["openapi"], "3.0.0");
    let paths = document["paths"].as_object().expect("paths object");
    let path_names: BTreeSet<&str> = paths.keys().map(String::as_str).collect();
    let registered: BTreeSet<&str> =
        MethodName::all().iter().map(|name| name.as_str()).collect();
    assert_eq!(path_names, registered);
}

#[test]
fn openapi_operations_are_uniform_posts() {
    let registry = test_registry();
    let document = openapi_document(&registry, &OpenApiInfoConfig::default());
    for (name, item) in document["paths"].as_object().expect("paths object") {
        let item = item.as_object().expect("path item object");
        assert_eq!(item.len(), 1, "{name} should expose exactly one verb");
        let operation = &item["post"];
        assert_eq!(operation["operationId"], name.replace('.', "_"));
        assert!(operation["requestBody"]["content"]["application/json"]["schema"].is_object());
        assert!(
            operation["responses"]["200"]["content"]["application/json"]["schema"].is_object()
        );
    }
}

#[test]
fn openapi_components_cover_shared_records() {
    let registry = test_registry();
    let document = openapi_document(&registry, &OpenApiInfoConfig::default());
    let schemas = document["components"]["schemas"].as_object().expect("schemas object");
    for name in ["Space", "Page", "Comment", "Project", "Task", "ApiKey", "JsonRpcError"] {
        assert!(schemas.contains_key(name), "missing component {name}");
    }
}

#[test]
fn openapi_info_comes_from_configuration() {
    let registry = test_registry();
    let info = OpenApiInfoConfig {
        title: "Custom Gateway".to_string(),
        version: "9.9.9".to_string(),
    };
    let document = openapi_document(&registry, &info);
    assert_eq!(document["info"]["title"], "Custom Gateway");
    assert_eq!(document["info"]["version"], "9.9.9");
}
