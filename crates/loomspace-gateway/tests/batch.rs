//! Batch dispatch integration tests for loomspace-gateway.
// crates/loomspace-gateway/tests/batch.rs
// ============================================================================
// Module: Batch Integration Tests
// Description: Order, length, and isolation guarantees for batch dispatch.
// Purpose: Verify batch semantics end to end.
// Dependencies: loomspace-core, loomspace-gateway, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

mod common;

use loomspace_gateway::CallContext;
use loomspace_gateway::run_batch;
use serde_json::Value;
use serde_json::json;

use crate::common::empty_services;
use crate::common::test_registry;

fn run(elements: Vec<Value>) -> Vec<Value> {
    let registry = test_registry();
    let services = empty_services();
    run_batch(&registry, &services, &CallContext::default(), &elements)
        .into_iter()
        .map(|response| serde_json::to_value(response).expect("response serializes"))
        .collect()
}

#[test]
fn empty_batch_yields_empty_response() {
    assert!(run(vec![]).is_empty());
}

#[test]
fn responses_are_positional() {
    let responses = run(vec![
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": "a" }),
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": "b" }),
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": "c" }),
    ]);
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], "a");
    assert_eq!(responses[1]["id"], "b");
    assert_eq!(responses[2]["id"], "c");
}

#[test]
fn mixed_batch_isolates_failures() {
    let responses = run(vec![
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": 1 }),
        json!({ "jsonrpc": "2.0", "method": "nope.nope", "id": 2 }),
        json!({ "method": "system.ping", "id": 3 }),
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": 4 }),
    ]);
    assert_eq!(responses.len(), 4);
    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[2]["error"]["code"], -32600);
    assert!(responses[3].get("error").is_none());
}

#[test]
fn non_object_elements_get_error_envelopes_in_place() {
    let responses = run(vec![
        json!("ping"),
        json!({ "jsonrpc": "2.0", "method": "system.ping", "id": 1 }),
        json!(42),
    ]);
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["id"], Value::Null);
    assert!(responses[1].get("error").is_none());
    assert_eq!(responses[2]["error"]["code"], -32600);
}

#[test]
fn batch_elements_share_state_sequentially() {
    let registry = test_registry();
    let services = empty_services();
    let elements = vec![
        json!({
            "jsonrpc": "2.0",
            "method": "space.create",
            "params": { "name": "Shared" },
            "id": 1,
        }),
        json!({ "jsonrpc": "2.0", "method": "space.list", "id": 2 }),
    ];
    let responses = run_batch(&registry, &services, &CallContext::default(), &elements);
    let listing = serde_json::to_value(&responses[1]).expect("response serializes");
    let spaces = listing["result"]["spaces"].as_array().expect("spaces array");
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0]["name"], "Shared");
}
