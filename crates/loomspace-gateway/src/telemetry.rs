// crates/loomspace-gateway/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Request outcome classification and metrics interface.
// Purpose: Count request outcomes without a hard metrics dependency.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Outcome labels and a minimal metrics interface. The default implementation
//! is a no-op; deployments wire their own recorder behind [`GatewayMetrics`].

use serde::Serialize;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Classification of how a gateway request concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Request succeeded.
    Ok,
    /// Envelope failed JSON-RPC validation.
    InvalidRequest,
    /// Method name not registered.
    MethodNotFound,
    /// Parameters failed schema validation.
    InvalidParams,
    /// Handler reported a domain error.
    DomainError,
    /// Handler failed internally.
    InternalError,
    /// Request body exceeded the configured limit.
    PayloadTooLarge,
}

impl RequestOutcome {
    /// Stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::InvalidRequest => "invalid_request",
            Self::MethodNotFound => "method_not_found",
            Self::InvalidParams => "invalid_params",
            Self::DomainError => "domain_error",
            Self::InternalError => "internal_error",
            Self::PayloadTooLarge => "payload_too_large",
        }
    }

    /// Maps a JSON-RPC error code to an outcome label.
    #[must_use]
    pub const fn from_error_code(code: i64) -> Self {
        match code {
            crate::protocol::INVALID_REQUEST => Self::InvalidRequest,
            crate::protocol::METHOD_NOT_FOUND => Self::MethodNotFound,
            crate::protocol::INVALID_PARAMS => Self::InvalidParams,
            crate::protocol::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            crate::protocol::INTERNAL_ERROR => Self::InternalError,
            _ => Self::DomainError,
        }
    }
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Metrics interface for gateway request accounting.
pub trait GatewayMetrics: Send + Sync {
    /// Records one completed request with its outcome.
    fn record_request(&self, method: Option<&str>, outcome: RequestOutcome);
    /// Records one batch with its element count.
    fn record_batch(&self, len: usize);
}

/// Metrics implementation that records nothing.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl GatewayMetrics for NoopMetrics {
    fn record_request(&self, _method: Option<&str>, _outcome: RequestOutcome) {}
    fn record_batch(&self, _len: usize) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
