// crates/loomspace-gateway/src/registry.rs
// ============================================================================
// Module: Method Registry & Dispatcher
// Description: Immutable method table and JSON-RPC dispatch.
// Purpose: Resolve methods, validate params, invoke handlers, map errors.
// Dependencies: loomspace-contract, loomspace-core, jsonschema
// ============================================================================

//! ## Overview
//! The registry is built once at startup from
//! [`loomspace_contract::method_contracts`] and is read-only afterwards, so
//! it is safe for concurrent readers without locking. Each entry pairs the
//! contract with a compiled params validator and a handler function; the
//! dispatcher maps every failure mode onto the JSON-RPC error taxonomy and
//! always echoes the request id.

use std::collections::BTreeMap;
use std::sync::Arc;

use jsonschema::Draft;
use jsonschema::Validator;
use loomspace_contract::MethodContract;
use loomspace_contract::method_contracts;
use loomspace_core::DomainError;
use loomspace_core::DomainServices;
use serde_json::json;
use thiserror::Error;

use crate::audit::GatewayAuditEvent;
use crate::audit::GatewayAuditSink;
use crate::handlers::HandlerFailure;
use crate::handlers::MethodHandler;
use crate::handlers::handler_for;
use crate::protocol;
use crate::protocol::JsonRpcRequest;
use crate::protocol::JsonRpcResponse;

// ============================================================================
// SECTION: Call Context
// ============================================================================

/// Ambient per-request context passed to handlers.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    /// Workspace identifier when the outer middleware resolved one.
    pub workspace_id: Option<String>,
    /// Authenticated principal identifier when available.
    pub principal: Option<String>,
    /// Request identifier for auditing.
    pub request_id: Option<String>,
}

impl CallContext {
    /// Returns a copy with the request identifier set.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// One registered method: contract, compiled validator, bound handler.
struct RegisteredMethod {
    /// Canonical contract.
    contract: MethodContract,
    /// Compiled params validator.
    params: Validator,
    /// Bound handler function.
    handler: MethodHandler,
}

/// Immutable method registry with name-indexed dispatch.
pub struct MethodRegistry {
    /// Registered methods in manifest order.
    methods: Vec<RegisteredMethod>,
    /// Wire-name index into `methods`.
    index: BTreeMap<&'static str, usize>,
    /// Audit sink for internal error detail.
    audit: Arc<dyn GatewayAuditSink>,
}

impl MethodRegistry {
    /// Builds the registry from the canonical contract table.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a params schema fails to compile or a
    /// method name collides.
    pub fn new(audit: Arc<dyn GatewayAuditSink>) -> Result<Self, RegistryError> {
        let contracts = method_contracts();
        let mut methods = Vec::with_capacity(contracts.len());
        let mut index = BTreeMap::new();
        for contract in contracts {
            let params = jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&contract.params_schema)
                .map_err(|err| {
                    RegistryError::Schema(format!("{}: {err}", contract.name.as_str()))
                })?;
            let handler = handler_for(contract.name);
            let slot = methods.len();
            if index.insert(contract.name.as_str(), slot).is_some() {
                return Err(RegistryError::Duplicate(contract.name.as_str()));
            }
            methods.push(RegisteredMethod {
                contract,
                params,
                handler,
            });
        }
        Ok(Self {
            methods,
            index,
            audit,
        })
    }

    /// Returns the registered contracts in manifest order.
    pub fn contracts(&self) -> impl Iterator<Item = &MethodContract> {
        self.methods.iter().map(|method| &method.contract)
    }

    /// Returns the number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true when no methods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Dispatches a validated request and wraps the outcome in an envelope.
    ///
    /// Every response echoes the request `id` unchanged. Domain errors keep
    /// their message in the application code range; internal failures are
    /// audited in full and answered with a generic `-32603`.
    #[must_use]
    pub fn dispatch(
        &self,
        services: &DomainServices,
        context: &CallContext,
        request: &JsonRpcRequest,
    ) -> JsonRpcResponse {
        let id = request.id.clone();
        let Some(&slot) = self.index.get(request.method.as_str()) else {
            return JsonRpcResponse::failure(id, protocol::METHOD_NOT_FOUND, "method not found");
        };
        let entry = &self.methods[slot];
        let params = request.params.clone().unwrap_or_else(|| json!({}));
        let violations: Vec<String> =
            entry.params.iter_errors(&params).map(|err| err.to_string()).collect();
        if !violations.is_empty() {
            return JsonRpcResponse::failure(
                id,
                protocol::INVALID_PARAMS,
                format!("invalid params: {}", violations.join("; ")),
            );
        }
        let context = context.clone().with_request_id(id.to_string());
        match (entry.handler)(services, &context, &params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(HandlerFailure::Domain(error)) => {
                JsonRpcResponse::failure(id, domain_error_code(&error), error.to_string())
            }
            Err(HandlerFailure::Internal(detail)) => {
                self.audit.record(&GatewayAuditEvent::internal_error(
                    entry.contract.name.as_str(),
                    context.request_id.as_deref(),
                    &detail,
                ));
                JsonRpcResponse::failure(id, protocol::INTERNAL_ERROR, "internal error")
            }
        }
    }
}

/// Maps a domain error onto its application-range JSON-RPC code.
const fn domain_error_code(error: &DomainError) -> i64 {
    match error {
        DomainError::NotFound(_) => protocol::DOMAIN_NOT_FOUND,
        DomainError::Validation(_) => protocol::DOMAIN_VALIDATION,
        DomainError::Conflict(_) => protocol::DOMAIN_CONFLICT,
        DomainError::Storage(_) => protocol::DOMAIN_STORAGE,
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry construction errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A params schema failed to compile.
    #[error("schema compilation failed: {0}")]
    Schema(String),
    /// Two contracts share one wire name.
    #[error("duplicate method name: {0}")]
    Duplicate(&'static str),
}
