// crates/loomspace-gateway/src/audit.rs
// ============================================================================
// Module: Gateway Audit Logging
// Description: Structured audit events for gateway request handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit event payloads and sinks for gateway request logging. The sink
//! interface is intentionally lightweight so deployments can route events to
//! their preferred logging pipeline without redesign. Internal error detail
//! lands here and only here; clients receive a generic message.

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::telemetry::RequestOutcome;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Gateway audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// JSON-RPC request identifier when present.
    pub request_id: Option<String>,
    /// Method wire name when resolved.
    pub method: Option<String>,
    /// Request outcome classification.
    pub outcome: RequestOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Request duration in milliseconds when measured.
    pub duration_ms: Option<u128>,
    /// Server-side detail; never returned to clients.
    pub detail: Option<String>,
}

impl GatewayAuditEvent {
    /// Builds an event for a completed RPC request.
    #[must_use]
    pub fn rpc_request(
        method: Option<&str>,
        request_id: Option<&str>,
        outcome: RequestOutcome,
        error_code: Option<i64>,
        duration_ms: u128,
    ) -> Self {
        Self {
            event: "rpc_request",
            timestamp_ms: epoch_ms(),
            request_id: request_id.map(str::to_string),
            method: method.map(str::to_string),
            outcome,
            error_code,
            duration_ms: Some(duration_ms),
            detail: None,
        }
    }

    /// Builds an event carrying internal failure detail.
    #[must_use]
    pub fn internal_error(method: &str, request_id: Option<&str>, detail: &str) -> Self {
        Self {
            event: "internal_error",
            timestamp_ms: epoch_ms(),
            request_id: request_id.map(str::to_string),
            method: Some(method.to_string()),
            outcome: RequestOutcome::InternalError,
            error_code: Some(crate::protocol::INTERNAL_ERROR),
            duration_ms: None,
            detail: Some(detail.to_string()),
        }
    }

    /// Builds an event for a bootstrap registration attempt.
    ///
    /// The registration token and key secret are never recorded.
    #[must_use]
    pub fn registration(outcome: RequestOutcome, status: u16, detail: Option<&str>) -> Self {
        Self {
            event: "api_key_registration",
            timestamp_ms: epoch_ms(),
            request_id: None,
            method: None,
            outcome,
            error_code: Some(i64::from(status)),
            duration_ms: None,
            detail: detail.map(str::to_string),
        }
    }
}

/// Returns milliseconds since the epoch for event timestamps.
fn epoch_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink interface for gateway events.
pub trait GatewayAuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: &GatewayAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Default)]
pub struct StderrAuditSink;

impl GatewayAuditSink for StderrAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Serialized writer over the audit file.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens (or creates) the audit file in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl GatewayAuditSink for FileAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
        }
    }
}

/// Audit sink that drops every event.
#[derive(Debug, Default)]
pub struct NoopAuditSink;

impl GatewayAuditSink for NoopAuditSink {
    fn record(&self, _event: &GatewayAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
