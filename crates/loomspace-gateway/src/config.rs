// crates/loomspace-gateway/src/config.rs
// ============================================================================
// Module: Gateway Configuration (Re-export)
// Description: Re-export canonical Loomspace config types.
// Purpose: Preserve gateway public API while centralizing config logic.
// Dependencies: loomspace-config
// ============================================================================

//! ## Overview
//! This module re-exports the canonical configuration model from
//! `loomspace-config` to keep gateway callers stable while enforcing a single
//! source of truth.

/// Re-export canonical config types and helpers.
pub use loomspace_config::*;
