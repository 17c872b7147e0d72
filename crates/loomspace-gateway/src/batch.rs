// crates/loomspace-gateway/src/batch.rs
// ============================================================================
// Module: Batch Dispatch
// Description: Sequential, order-preserving batch request execution.
// Purpose: Run each batch element through envelope validation and dispatch.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Batch execution over an already-parsed JSON array. Elements run
//! sequentially in array order and each produces exactly one response in the
//! matching position. A malformed or failing element never affects its
//! neighbors.

use loomspace_core::DomainServices;
use serde_json::Value;

use crate::protocol::JsonRpcResponse;
use crate::protocol::validate_envelope;
use crate::registry::CallContext;
use crate::registry::MethodRegistry;

// ============================================================================
// SECTION: Batch Execution
// ============================================================================

/// Runs every batch element and returns responses in element order.
///
/// The response vector always has the same length as `elements`: shape
/// failures produce an error envelope in place rather than dropping the slot.
#[must_use]
pub fn run_batch(
    registry: &MethodRegistry,
    services: &DomainServices,
    context: &CallContext,
    elements: &[Value],
) -> Vec<JsonRpcResponse> {
    elements
        .iter()
        .map(|element| match validate_envelope(element) {
            Ok(request) => registry.dispatch(services, context, &request),
            Err(response) => response,
        })
        .collect()
}
