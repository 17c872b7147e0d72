// crates/loomspace-gateway/src/register.rs
// ============================================================================
// Module: API-Key Bootstrap Registration
// Description: Registration-token-gated minting of API keys.
// Purpose: Let operators mint the first credentials before any session exists.
// Dependencies: axum, rand, serde, serde_json, subtle
// ============================================================================

//! ## Overview
//! The bootstrap endpoint mints API keys for MCP clients. It is gated by a
//! shared registration token from configuration, compared in constant time.
//! Token checks run before body parsing so an unauthenticated caller learns
//! nothing about payload validation. The minted secret appears exactly once,
//! in the success response; audit events never carry it.

use axum::http::StatusCode;
use loomspace_core::DomainError;
use loomspace_core::DomainServices;
use loomspace_core::NewApiKey;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use subtle::ConstantTimeEq;

/// Header carrying the shared registration token.
pub const REGISTRATION_TOKEN_HEADER: &str = "x-registration-token";

/// Minimum length of a trimmed key name.
pub const MIN_KEY_NAME_CHARS: usize = 3;

/// Number of random bytes in a minted key secret.
const SECRET_BYTES: usize = 16;

// ============================================================================
// SECTION: Request Shape
// ============================================================================

/// Bootstrap registration request body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegisterRequest {
    /// Human-readable key name.
    name: String,
    /// Owning user identifier.
    user_id: String,
    /// Owning workspace identifier.
    workspace_id: String,
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Handles one bootstrap registration attempt.
///
/// Returns the HTTP status and JSON body to send. Ordering is fixed: token
/// presence, token equality, body shape, field validation, directory lookup,
/// then persistence.
#[must_use]
pub fn register_api_key(
    services: &DomainServices,
    expected_token: &str,
    token: Option<&str>,
    body: &[u8],
) -> (StatusCode, Value) {
    let Some(token) = token else {
        return error_body(StatusCode::UNAUTHORIZED, "missing registration token");
    };
    if !token_matches(token, expected_token) {
        return error_body(StatusCode::UNAUTHORIZED, "invalid registration token");
    }
    let request: RegisterRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(error) => {
            return error_body(StatusCode::BAD_REQUEST, format!("invalid request body: {error}"));
        }
    };
    let name = request.name.trim();
    if name.chars().count() < MIN_KEY_NAME_CHARS {
        return error_body(
            StatusCode::BAD_REQUEST,
            format!("key name must be at least {MIN_KEY_NAME_CHARS} characters"),
        );
    }
    if request.user_id.trim().is_empty() || request.workspace_id.trim().is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "user_id and workspace_id are required");
    }
    match principal_known(services, &request.user_id, &request.workspace_id) {
        Ok(true) => {}
        Ok(false) => {
            return error_body(StatusCode::BAD_REQUEST, "user or workspace not found");
        }
        Err(error) => return domain_error_body(&error),
    }
    let created = services.api_keys.create(NewApiKey {
        name: name.to_string(),
        user_id: request.user_id,
        workspace_id: request.workspace_id,
        secret: generate_secret(),
        created_at_ms: now_ms(),
    });
    match created {
        Ok(record) => (
            StatusCode::OK,
            json!({
                "key_id": record.key_id,
                "name": record.name,
                "user_id": record.user_id,
                "workspace_id": record.workspace_id,
                "secret": record.secret,
                "created_at_ms": record.created_at_ms,
            }),
        ),
        Err(error) => domain_error_body(&error),
    }
}

/// Compares the presented token against the configured one in constant time.
fn token_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Checks that both the user and the workspace exist.
fn principal_known(
    services: &DomainServices,
    user_id: &str,
    workspace_id: &str,
) -> Result<bool, DomainError> {
    Ok(services.directory.user_exists(user_id)?
        && services.directory.workspace_exists(workspace_id)?)
}

/// Generates a fresh hex-encoded key secret from OS randomness.
fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut secret = String::with_capacity(SECRET_BYTES * 2);
    for byte in bytes {
        let _ = std::fmt::Write::write_fmt(&mut secret, format_args!("{byte:02x}"));
    }
    secret
}

/// Current wall-clock time in milliseconds since the epoch.
fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Builds a uniform error body.
fn error_body(status: StatusCode, message: impl Into<String>) -> (StatusCode, Value) {
    (status, json!({ "error": message.into() }))
}

/// Maps domain errors onto HTTP statuses for the bootstrap surface.
fn domain_error_body(error: &DomainError) -> (StatusCode, Value) {
    let status = match error {
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::NotFound(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    error_body(status, error.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
