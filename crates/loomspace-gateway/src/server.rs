// crates/loomspace-gateway/src/server.rs
// ============================================================================
// Module: Gateway HTTP Server
// Description: HTTP transport for JSON-RPC dispatch, exporters, and bootstrap.
// Purpose: Expose the gateway surface over axum.
// Dependencies: loomspace-core, loomspace-config, axum, tokio
// ============================================================================

//! ## Overview
//! The HTTP server wires five routes over one shared state: single dispatch,
//! batch dispatch, the tool-manifest exporter, the OpenAPI exporter, and the
//! API-key bootstrap endpoint. Workspace-context resolution runs as the first
//! routing stage; every gateway route sits on the exemption list, so the
//! surface works before any workspace context exists.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use loomspace_core::DomainServices;
use serde_json::Value;
use thiserror::Error;

use crate::audit::GatewayAuditEvent;
use crate::audit::GatewayAuditSink;
use crate::audit::StderrAuditSink;
use crate::batch::run_batch;
use crate::config::GatewayConfig;
use crate::context::workspace_context;
use crate::openapi::openapi_document;
use crate::protocol;
use crate::protocol::JsonRpcResponse;
use crate::protocol::validate_envelope;
use crate::register::REGISTRATION_TOKEN_HEADER;
use crate::register::register_api_key;
use crate::registry::CallContext;
use crate::registry::MethodRegistry;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestOutcome;
use crate::tools::tool_manifest;

// ============================================================================
// SECTION: Server
// ============================================================================

/// Gateway server instance.
pub struct GatewayServer {
    /// Shared handler state.
    state: Arc<GatewayState>,
}

/// Shared state behind every route handler.
pub struct GatewayState {
    /// Immutable dispatch registry.
    pub registry: MethodRegistry,
    /// Domain service bundle.
    pub services: DomainServices,
    /// Validated gateway configuration.
    pub config: GatewayConfig,
    /// Audit sink for request events.
    pub audit: Arc<dyn GatewayAuditSink>,
    /// Metrics recorder for request outcomes.
    pub metrics: Arc<dyn GatewayMetrics>,
}

impl GatewayServer {
    /// Builds a server from configuration with default stderr auditing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when the configuration is invalid or
    /// the registry fails to build.
    pub fn from_config(
        config: GatewayConfig,
        services: DomainServices,
    ) -> Result<Self, GatewayServerError> {
        Self::with_sinks(config, services, Arc::new(StderrAuditSink), Arc::new(NoopMetrics))
    }

    /// Builds a server with explicit audit and metrics sinks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when the configuration is invalid or
    /// the registry fails to build.
    pub fn with_sinks(
        config: GatewayConfig,
        services: DomainServices,
        audit: Arc<dyn GatewayAuditSink>,
        metrics: Arc<dyn GatewayMetrics>,
    ) -> Result<Self, GatewayServerError> {
        config.validate().map_err(|err| GatewayServerError::Config(err.to_string()))?;
        let registry = MethodRegistry::new(audit.clone())
            .map_err(|err| GatewayServerError::Init(err.to_string()))?;
        let state = Arc::new(GatewayState {
            registry,
            services,
            config,
            audit,
            metrics,
        });
        Ok(Self {
            state,
        })
    }

    /// Builds the axum router with workspace-context resolution first.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/mcp", post(handle_rpc))
            .route("/api/mcp/batch", post(handle_batch))
            .route("/api/mcp/tools", get(handle_tools))
            .route("/api/mcp/openapi.json", get(handle_openapi))
            .route("/api/api-keys/register", post(handle_register))
            .layer(middleware::from_fn_with_state(self.state.clone(), workspace_context))
            .with_state(self.state.clone())
    }

    /// Serves requests on the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), GatewayServerError> {
        let addr: SocketAddr = self
            .state
            .config
            .server
            .bind
            .parse()
            .map_err(|_| GatewayServerError::Config("invalid bind address".to_string()))?;
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| GatewayServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| GatewayServerError::Transport("http server failed".to_string()))
    }
}

// ============================================================================
// SECTION: Route Handlers
// ============================================================================

/// Handles single JSON-RPC dispatch at `POST /api/mcp`.
async fn handle_rpc(State(state): State<Arc<GatewayState>>, bytes: Bytes) -> impl IntoResponse {
    let started = Instant::now();
    let (status, method, response) = dispatch_single(&state, &bytes);
    record_request(&state, method.as_deref(), &response, started);
    (status, axum::Json(response))
}

/// Handles batch JSON-RPC dispatch at `POST /api/mcp/batch`.
async fn handle_batch(
    State(state): State<Arc<GatewayState>>,
    bytes: Bytes,
) -> axum::response::Response {
    let started = Instant::now();
    match dispatch_batch(&state, &bytes) {
        Ok(entries) => {
            state.metrics.record_batch(entries.len());
            for (method, response) in &entries {
                record_request(&state, method.as_deref(), response, started);
            }
            let responses: Vec<JsonRpcResponse> =
                entries.into_iter().map(|(_, response)| response).collect();
            (StatusCode::OK, axum::Json(responses)).into_response()
        }
        Err((status, response)) => {
            record_request(&state, None, &response, started);
            (status, axum::Json(response)).into_response()
        }
    }
}

/// Handles tool-manifest export at `GET /api/mcp/tools`.
async fn handle_tools(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    axum::Json(tool_manifest(&state.registry, &state.config.manifest))
}

/// Handles OpenAPI export at `GET /api/mcp/openapi.json`.
async fn handle_openapi(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    axum::Json(openapi_document(&state.registry, &state.config.openapi))
}

/// Handles API-key bootstrap at `POST /api/api-keys/register`.
async fn handle_register(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    bytes: Bytes,
) -> impl IntoResponse {
    let token = headers.get(REGISTRATION_TOKEN_HEADER).and_then(|value| value.to_str().ok());
    let (status, body) =
        register_api_key(&state.services, &state.config.registration.token, token, &bytes);
    let outcome = if status == StatusCode::OK {
        RequestOutcome::Ok
    } else {
        RequestOutcome::DomainError
    };
    state.audit.record(&GatewayAuditEvent::registration(outcome, status.as_u16(), None));
    (status, axum::Json(body))
}

// ============================================================================
// SECTION: Dispatch Plumbing
// ============================================================================

/// Runs body checks, envelope validation, and dispatch for one request.
///
/// The middle element is the method label for telemetry, best-effort when
/// the envelope never validated.
fn dispatch_single(
    state: &GatewayState,
    bytes: &[u8],
) -> (StatusCode, Option<String>, JsonRpcResponse) {
    if bytes.len() > state.config.server.max_body_bytes {
        return (StatusCode::PAYLOAD_TOO_LARGE, None, payload_too_large());
    }
    let parsed: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                None,
                JsonRpcResponse::failure(
                    Value::Null,
                    protocol::INVALID_REQUEST,
                    "request body is not valid JSON",
                ),
            );
        }
    };
    if parsed.is_array() {
        return (
            StatusCode::BAD_REQUEST,
            None,
            JsonRpcResponse::failure(
                Value::Null,
                protocol::INVALID_REQUEST,
                "batch requests must use the batch endpoint",
            ),
        );
    }
    let method = method_label(&parsed);
    match validate_envelope(&parsed) {
        Ok(request) => {
            let context = CallContext::default();
            let response = state.registry.dispatch(&state.services, &context, &request);
            (StatusCode::OK, method, response)
        }
        Err(response) => (StatusCode::BAD_REQUEST, method, response),
    }
}

/// Runs body checks, parsing, and batch dispatch for one batch request.
///
/// Returns the per-element `(method, response)` pairs in element order, or
/// the single error envelope and status to send when the body never reached
/// batch execution.
fn dispatch_batch(
    state: &GatewayState,
    bytes: &[u8],
) -> Result<Vec<(Option<String>, JsonRpcResponse)>, (StatusCode, JsonRpcResponse)> {
    if bytes.len() > state.config.server.max_body_bytes {
        return Err((StatusCode::PAYLOAD_TOO_LARGE, payload_too_large()));
    }
    let parsed: Value = serde_json::from_slice(bytes).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            JsonRpcResponse::failure(
                Value::Null,
                protocol::INVALID_REQUEST,
                "request body is not valid JSON",
            ),
        )
    })?;
    let Value::Array(elements) = parsed else {
        return Err((
            StatusCode::BAD_REQUEST,
            JsonRpcResponse::failure(
                Value::Null,
                protocol::INVALID_REQUEST,
                "batch body must be a JSON array",
            ),
        ));
    };
    let context = CallContext::default();
    let responses = run_batch(&state.registry, &state.services, &context, &elements);
    Ok(elements.iter().map(method_label).zip(responses).collect())
}

/// Best-effort method label for telemetry; envelope validation still rules.
fn method_label(body: &Value) -> Option<String> {
    body.get("method").and_then(Value::as_str).map(str::to_string)
}

/// Builds the oversized-body error envelope.
fn payload_too_large() -> JsonRpcResponse {
    JsonRpcResponse::failure(
        Value::Null,
        protocol::PAYLOAD_TOO_LARGE,
        "request body exceeds the configured limit",
    )
}

/// Records audit and metrics entries for one completed response.
fn record_request(
    state: &GatewayState,
    method: Option<&str>,
    response: &JsonRpcResponse,
    started: Instant,
) {
    let outcome = match response.error_code() {
        None => RequestOutcome::Ok,
        Some(code) => RequestOutcome::from_error_code(code),
    };
    state.metrics.record_request(method, outcome);
    state.audit.record(&GatewayAuditEvent::rpc_request(
        method,
        Some(&response.id.to_string()),
        outcome,
        response.error_code(),
        started.elapsed().as_millis(),
    ));
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway server errors.
#[derive(Debug, Error)]
pub enum GatewayServerError {
    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
    /// Initialization failed.
    #[error("initialization error: {0}")]
    Init(String),
    /// Transport failed.
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests;
