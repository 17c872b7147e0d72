// crates/loomspace-gateway/src/context.rs
// ============================================================================
// Module: Workspace Context Resolution
// Description: Workspace-scoping middleware and its exemption list.
// Purpose: Keep gateway routes reachable before any workspace exists.
// Dependencies: axum
// ============================================================================

//! ## Overview
//! Every route normally requires a resolved workspace context. The gateway
//! surface must work before that context exists: MCP clients call in with an
//! API key instead of a session, and the bootstrap endpoint is how the first
//! key gets minted. The exemption list below is checked as the first routing
//! stage, ahead of workspace resolution.

use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::json;

use crate::server::GatewayState;

// ============================================================================
// SECTION: Exemption List
// ============================================================================

/// How an exempt route pattern matches a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    /// Matches the path and everything nested under it.
    Prefix,
    /// Matches the path exactly.
    Exact,
}

/// One context-exempt route pattern.
#[derive(Debug, Clone, Copy)]
pub struct ExemptRoute {
    /// Path pattern, without a trailing slash.
    pub path: &'static str,
    /// Matching mode for the pattern.
    pub mode: RouteMatch,
}

/// Routes that bypass workspace-context resolution.
///
/// The MCP prefix covers dispatch, batch, and both exporters; the bootstrap
/// endpoint is listed exactly so no sibling under `/api/api-keys` is exposed.
pub const CONTEXT_EXEMPT_ROUTES: &[ExemptRoute] = &[
    ExemptRoute {
        path: "/api/mcp",
        mode: RouteMatch::Prefix,
    },
    ExemptRoute {
        path: "/api/api-keys/register",
        mode: RouteMatch::Exact,
    },
];

/// Returns whether a request path bypasses workspace-context resolution.
///
/// A single trailing slash is tolerated on exact matches.
#[must_use]
pub fn is_context_exempt(path: &str) -> bool {
    let normalized = if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    };
    CONTEXT_EXEMPT_ROUTES.iter().any(|route| match route.mode {
        RouteMatch::Prefix => normalized.starts_with(route.path),
        RouteMatch::Exact => normalized == route.path,
    })
}

// ============================================================================
// SECTION: Middleware
// ============================================================================

/// Header carrying the caller's workspace identifier.
pub const WORKSPACE_HEADER: &str = "x-workspace-id";

/// Resolved workspace context attached to non-exempt requests.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Workspace the request is scoped to.
    pub workspace_id: String,
}

/// First routing stage: resolves workspace context or rejects the request.
///
/// Exempt paths pass through untouched. Every other path must carry a
/// [`WORKSPACE_HEADER`] naming a workspace the directory knows; requests
/// that fail resolution are answered with `404` so unscoped probing cannot
/// distinguish missing routes from missing context.
pub async fn workspace_context(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    if is_context_exempt(request.uri().path()) {
        return next.run(request).await;
    }
    let workspace_id = request
        .headers()
        .get(WORKSPACE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let resolved = workspace_id
        .filter(|id| state.services.directory.workspace_exists(id).unwrap_or(false));
    let Some(workspace_id) = resolved else {
        let body = axum::Json(json!({ "error": "workspace not resolved" }));
        return (StatusCode::NOT_FOUND, body).into_response();
    };
    let mut request = request;
    request.extensions_mut().insert(WorkspaceContext {
        workspace_id,
    });
    next.run(request).await
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mcp_prefix_covers_nested_routes() {
        assert!(is_context_exempt("/api/mcp"));
        assert!(is_context_exempt("/api/mcp/batch"));
        assert!(is_context_exempt("/api/mcp/openapi.json"));
        assert!(is_context_exempt("/api/mcp/"));
    }

    #[test]
    fn bootstrap_route_matches_exactly() {
        assert!(is_context_exempt("/api/api-keys/register"));
        assert!(is_context_exempt("/api/api-keys/register/"));
        assert!(!is_context_exempt("/api/api-keys"));
        assert!(!is_context_exempt("/api/api-keys/register/extra"));
    }

    #[test]
    fn other_routes_require_context() {
        assert!(!is_context_exempt("/"));
        assert!(!is_context_exempt("/api/pages"));
        assert!(!is_context_exempt("/api/mc"));
    }
}
