// crates/loomspace-core/src/error.rs
// ============================================================================
// Module: Domain Errors
// Description: Error taxonomy for domain service operations.
// Purpose: Give the gateway a stable, recoverable error surface to map onto
//          JSON-RPC application error codes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Domain errors are expected, caller-correctable conditions. The gateway
//! preserves their messages when mapping them into the JSON-RPC application
//! error range; unexpected failures are not modelled here.

use thiserror::Error;

/// Errors raised by domain service operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// An operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Input violates a domain rule beyond schema shape.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The backing store rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),
}
