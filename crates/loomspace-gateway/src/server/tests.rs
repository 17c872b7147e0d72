// crates/loomspace-gateway/src/server/tests.rs
// ============================================================================
// Module: Gateway Server Tests
// Description: Unit tests for dispatch plumbing and status mapping.
// Purpose: Verify body limits, envelope rejection, and error statuses.
// Dependencies: loomspace-core, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use std::sync::Arc;

use axum::http::StatusCode;
use loomspace_core::InMemoryApiKeyStore;
use loomspace_core::InMemoryDirectory;
use loomspace_core::InMemoryWorkspaceStore;
use serde_json::json;

use super::*;
use crate::audit::NoopAuditSink;

fn test_config() -> GatewayConfig {
    GatewayConfig::from_toml_str(
        r#"
        [registration]
        token = "bootstrap-token-0123456789abcdef"
        "#,
    )
    .expect("config parses")
}

fn test_services() -> DomainServices {
    let store = Arc::new(InMemoryWorkspaceStore::new());
    DomainServices {
        spaces: store.clone(),
        pages: store.clone(),
        comments: store.clone(),
        projects: store.clone(),
        tasks: store,
        directory: Arc::new(InMemoryDirectory::new()),
        api_keys: Arc::new(InMemoryApiKeyStore::new()),
    }
}

fn test_state() -> Arc<GatewayState> {
    let config = test_config();
    let audit: Arc<dyn GatewayAuditSink> = Arc::new(NoopAuditSink);
    let registry = MethodRegistry::new(audit.clone()).expect("registry builds");
    Arc::new(GatewayState {
        registry,
        services: test_services(),
        config,
        audit,
        metrics: Arc::new(NoopMetrics),
    })
}

#[test]
fn server_builds_from_valid_config() {
    let server = GatewayServer::from_config(test_config(), test_services());
    assert!(server.is_ok());
}

#[test]
fn invalid_config_is_rejected_at_build() {
    let mut config = test_config();
    config.registration.token = "short".to_string();
    let result = GatewayServer::from_config(config, test_services());
    assert!(matches!(result, Err(GatewayServerError::Config(_))));
}

#[test]
fn ping_dispatches_with_ok_status() {
    let state = test_state();
    let body = serde_json::to_vec(&json!({
        "jsonrpc": "2.0",
        "method": "system.ping",
        "params": {},
        "id": 1,
    }))
    .expect("body serializes");
    let (status, method, response) = dispatch_single(&state, &body);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(method.as_deref(), Some("system.ping"));
    assert_eq!(response.id, json!(1));
    assert!(response.error_code().is_none());
}

#[test]
fn invalid_json_is_bad_request() {
    let state = test_state();
    let (status, method, response) = dispatch_single(&state, b"{not json");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(method.is_none());
    assert_eq!(response.error_code(), Some(protocol::INVALID_REQUEST));
}

#[test]
fn array_body_is_rejected_at_single_endpoint() {
    let state = test_state();
    let body = serde_json::to_vec(&json!([])).expect("body serializes");
    let (status, _, response) = dispatch_single(&state, &body);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some(protocol::INVALID_REQUEST));
}

#[test]
fn oversized_body_maps_to_payload_too_large() {
    let state = test_state();
    let oversized = vec![b' '; state.config.server.max_body_bytes + 1];
    let (status, _, response) = dispatch_single(&state, &oversized);
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code(), Some(protocol::PAYLOAD_TOO_LARGE));
}

#[test]
fn unknown_method_is_ok_status_with_rpc_error() {
    let state = test_state();
    let body = serde_json::to_vec(&json!({
        "jsonrpc": "2.0",
        "method": "nope.nope",
        "id": "a",
    }))
    .expect("body serializes");
    let (status, method, response) = dispatch_single(&state, &body);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(method.as_deref(), Some("nope.nope"));
    assert_eq!(response.error_code(), Some(protocol::METHOD_NOT_FOUND));
}

#[test]
fn batch_non_array_body_is_bad_request() {
    let state = test_state();
    let body = serde_json::to_vec(&json!({
        "jsonrpc": "2.0",
        "method": "system.ping",
        "id": 1,
    }))
    .expect("body serializes");
    let (status, response) = dispatch_batch(&state, &body).expect_err("object rejected");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some(protocol::INVALID_REQUEST));
}

#[test]
fn batch_invalid_json_is_bad_request() {
    let state = test_state();
    let (status, response) = dispatch_batch(&state, b"[not json").expect_err("junk rejected");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some(protocol::INVALID_REQUEST));
}

#[test]
fn batch_oversized_body_maps_to_payload_too_large() {
    let state = test_state();
    let oversized = vec![b' '; state.config.server.max_body_bytes + 1];
    let (status, response) = dispatch_batch(&state, &oversized).expect_err("oversized rejected");
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code(), Some(protocol::PAYLOAD_TOO_LARGE));
}

#[test]
fn batch_entries_carry_method_labels() {
    let state = test_state();
    let body = serde_json::to_vec(&json!([
        { "jsonrpc": "2.0", "method": "system.ping", "id": 1 },
        { "jsonrpc": "2.0", "method": "nope.nope", "id": 2 },
        "not an object",
    ]))
    .expect("body serializes");
    let entries = dispatch_batch(&state, &body).expect("batch runs");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].0.as_deref(), Some("system.ping"));
    assert_eq!(entries[1].0.as_deref(), Some("nope.nope"));
    assert!(entries[2].0.is_none());
    assert_eq!(entries[2].1.error_code(), Some(protocol::INVALID_REQUEST));
}

/// Audit sink that keeps events for inspection.
#[derive(Default)]
struct CapturingAuditSink {
    /// Recorded events in arrival order.
    events: std::sync::Mutex<Vec<GatewayAuditEvent>>,
}

impl GatewayAuditSink for CapturingAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[test]
fn recorded_requests_carry_the_method_name() {
    let sink = Arc::new(CapturingAuditSink::default());
    let audit: Arc<dyn GatewayAuditSink> = sink.clone();
    let registry = MethodRegistry::new(audit.clone()).expect("registry builds");
    let state = Arc::new(GatewayState {
        registry,
        services: test_services(),
        config: test_config(),
        audit,
        metrics: Arc::new(NoopMetrics),
    });
    let body = serde_json::to_vec(&json!({
        "jsonrpc": "2.0",
        "method": "system.ping",
        "id": 1,
    }))
    .expect("body serializes");
    let started = Instant::now();
    let (_, method, response) = dispatch_single(&state, &body);
    record_request(&state, method.as_deref(), &response, started);
    let events = sink.events.lock().expect("events readable");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].method.as_deref(), Some("system.ping"));
    assert_eq!(events[0].outcome, RequestOutcome::Ok);
}
