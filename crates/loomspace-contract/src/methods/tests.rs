// crates/loomspace-contract/src/methods/tests.rs
// ============================================================================
// Module: Method Contract Unit Tests
// Description: Unit tests for the canonical contract table.
// Purpose: Guard ordering, uniqueness, and schema validity of contracts.
// Dependencies: loomspace-contract
// ============================================================================

//! ## Overview
//! Guards the invariants the exporters rely on: one contract per method, in
//! enum order, with compilable self-contained params schemas.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use std::collections::BTreeSet;

use jsonschema::Draft;

use super::method_contracts;
use super::tool_definitions;
use crate::types::MethodName;

#[test]
fn contracts_cover_every_method_once_in_order() {
    let contracts = method_contracts();
    let names: Vec<MethodName> = contracts.iter().map(|contract| contract.name).collect();
    assert_eq!(names, MethodName::all().to_vec());
}

#[test]
fn wire_names_are_unique_and_dot_namespaced() {
    let mut seen = BTreeSet::new();
    for method in MethodName::all() {
        let name = method.as_str();
        assert!(seen.insert(name), "duplicate method name {name}");
        let mut parts = name.split('.');
        let domain = parts.next().unwrap_or_default();
        let action = parts.next().unwrap_or_default();
        assert!(!domain.is_empty() && !action.is_empty(), "bad method name {name}");
        assert!(parts.next().is_none(), "bad method name {name}");
    }
}

#[test]
fn from_name_round_trips() {
    for method in MethodName::all() {
        assert_eq!(MethodName::from_name(method.as_str()), Some(*method));
    }
    assert_eq!(MethodName::from_name("nope.nope"), None);
}

#[test]
fn params_schemas_compile_standalone() {
    for contract in method_contracts() {
        let compiled = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&contract.params_schema);
        assert!(
            compiled.is_ok(),
            "params schema for {} failed to compile",
            contract.name.as_str()
        );
    }
}

#[test]
fn params_schemas_reject_unknown_fields() {
    for contract in method_contracts() {
        let additional = contract.params_schema.get("additionalProperties");
        assert_eq!(
            additional,
            Some(&serde_json::Value::Bool(false)),
            "params schema for {} must close its property set",
            contract.name.as_str()
        );
    }
}

#[test]
fn tool_definitions_project_contracts_verbatim() {
    let contracts = method_contracts();
    let definitions = tool_definitions();
    assert_eq!(contracts.len(), definitions.len());
    for (contract, definition) in contracts.iter().zip(&definitions) {
        assert_eq!(definition.kind, "function");
        assert_eq!(definition.function.name, contract.name.as_str());
        assert_eq!(definition.function.parameters, contract.params_schema);
    }
}

#[test]
fn descriptions_are_non_empty() {
    for contract in method_contracts() {
        assert!(
            !contract.description.trim().is_empty(),
            "missing description for {}",
            contract.name.as_str()
        );
    }
}
