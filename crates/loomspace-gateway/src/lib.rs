// crates/loomspace-gateway/src/lib.rs
// ============================================================================
// Module: Loomspace Gateway
// Description: JSON-RPC 2.0 gateway over the Loomspace domain services.
// Purpose: Expose domain operations, tool schemas, and bootstrap registration.
// Dependencies: loomspace-core, loomspace-contract, loomspace-config, axum, tokio
// ============================================================================

//! ## Overview
//! The Loomspace MCP gateway validates JSON-RPC 2.0 envelopes, dispatches
//! methods through an immutable registry built from
//! [`loomspace_contract::method_contracts`], processes batches with per-element
//! isolation, and projects the registry into a tool manifest and an OpenAPI
//! document. A registration-token-gated bootstrap endpoint mints API keys
//! before any workspace context exists; the context-exemption list keeps all
//! gateway routes reachable ahead of workspace resolution.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod batch;
pub mod config;
pub mod context;
pub mod handlers;
pub mod openapi;
pub mod protocol;
pub mod register;
pub mod registry;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::GatewayAuditEvent;
pub use audit::GatewayAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use batch::run_batch;
pub use config::GatewayConfig;
pub use context::CONTEXT_EXEMPT_ROUTES;
pub use context::is_context_exempt;
pub use openapi::openapi_document;
pub use protocol::JsonRpcError;
pub use protocol::JsonRpcRequest;
pub use protocol::JsonRpcResponse;
pub use protocol::validate_envelope;
pub use register::REGISTRATION_TOKEN_HEADER;
pub use register::register_api_key;
pub use registry::CallContext;
pub use registry::MethodRegistry;
pub use server::GatewayServer;
pub use server::GatewayServerError;
pub use server::GatewayState;
pub use telemetry::GatewayMetrics;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestOutcome;
pub use tools::tool_manifest;
