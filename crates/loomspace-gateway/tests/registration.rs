//! Registration integration tests for loomspace-gateway.
// crates/loomspace-gateway/tests/registration.rs
// ============================================================================
// Module: Registration Integration Tests
// Description: Bootstrap API-key minting through the registration gate.
// Purpose: Verify token gating, validation ordering, and key persistence.
// Dependencies: loomspace-core, loomspace-gateway, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use loomspace_core::InMemoryApiKeyStore;
use loomspace_gateway::register_api_key;
use serde_json::json;

use crate::common::TEST_TOKEN;
use crate::common::seeded_services;

fn body(name: &str, user_id: &str, workspace_id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "name": name,
        "user_id": user_id,
        "workspace_id": workspace_id,
    }))
    .expect("body serializes")
}

#[test]
fn full_registration_flow_mints_a_key() {
    let services = seeded_services();
    let (status, response) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("ci-bot", "user-1", "ws-1"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["name"], "ci-bot");
    assert_eq!(response["user_id"], "user-1");
    assert_eq!(response["workspace_id"], "ws-1");
    assert!(response["key_id"].as_str().expect("key id").starts_with("key-"));
    assert_eq!(response["secret"].as_str().expect("secret").len(), 32);
}

#[test]
fn minted_key_is_persisted() {
    let services = seeded_services();
    let store = Arc::new(InMemoryApiKeyStore::new());
    let services = loomspace_core::DomainServices {
        api_keys: store.clone(),
        ..services
    };
    let (status, response) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("ci-bot", "user-1", "ws-1"));
    assert_eq!(status, StatusCode::OK);
    let records = store.records().expect("records readable");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key_id, response["key_id"]);
    assert_eq!(records[0].secret, response["secret"]);
}

#[test]
fn missing_token_is_rejected_before_validation() {
    let services = seeded_services();
    let (status, response) = register_api_key(&services, TEST_TOKEN, None, b"not even json");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "missing registration token");
}

#[test]
fn wrong_token_is_rejected_before_validation() {
    let services = seeded_services();
    let (status, response) =
        register_api_key(&services, TEST_TOKEN, Some("wrong-token"), b"not even json");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "invalid registration token");
}

#[test]
fn malformed_body_is_bad_request() {
    let services = seeded_services();
    let (status, _) = register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), b"{\"name\":");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn unknown_user_or_workspace_is_bad_request() {
    let services = seeded_services();
    let (status, response) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("ci-bot", "ghost", "ws-1"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "user or workspace not found");
    let (status, _) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("ci-bot", "user-1", "ws-9"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn duplicate_key_name_in_workspace_conflicts() {
    let services = seeded_services();
    let payload = body("ci-bot", "user-1", "ws-1");
    let (first, _) = register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &payload);
    assert_eq!(first, StatusCode::OK);
    let (second, response) = register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &payload);
    assert_eq!(second, StatusCode::CONFLICT);
    assert!(response["error"].as_str().expect("error message").contains("conflict"));
}

#[test]
fn two_keys_get_distinct_secrets() {
    let services = seeded_services();
    let (_, first) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("bot-a", "user-1", "ws-1"));
    let (_, second) =
        register_api_key(&services, TEST_TOKEN, Some(TEST_TOKEN), &body("bot-b", "user-1", "ws-1"));
    assert_ne!(first["secret"], second["secret"]);
    assert_ne!(first["key_id"], second["key_id"]);
}
