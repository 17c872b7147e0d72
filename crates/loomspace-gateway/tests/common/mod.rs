// crates/loomspace-gateway/tests/common/mod.rs
// ============================================================================
// Module: Gateway Test Fixtures
// Description: Shared fixtures for gateway integration tests.
// Purpose: Build seeded services, registries, and configuration.
// Dependencies: loomspace-core, loomspace-gateway
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Test-only fixtures shared across integration suites."
)]

use std::sync::Arc;

use loomspace_config::GatewayConfig;
use loomspace_core::DomainServices;
use loomspace_core::InMemoryApiKeyStore;
use loomspace_core::InMemoryDirectory;
use loomspace_core::InMemoryWorkspaceStore;
use loomspace_gateway::MethodRegistry;
use loomspace_gateway::NoopAuditSink;

/// Registration token used by test configuration.
pub const TEST_TOKEN: &str = "bootstrap-token-0123456789abcdef";

/// Builds a valid gateway configuration for tests.
pub fn test_config() -> GatewayConfig {
    GatewayConfig::from_toml_str(&format!(
        r#"
        [registration]
        token = "{TEST_TOKEN}"
        "#
    ))
    .expect("test config parses")
}

/// Builds an empty in-memory service bundle.
pub fn empty_services() -> DomainServices {
    let store = Arc::new(InMemoryWorkspaceStore::new());
    DomainServices {
        spaces: store.clone(),
        pages: store.clone(),
        comments: store.clone(),
        projects: store.clone(),
        tasks: store,
        directory: Arc::new(InMemoryDirectory::new()),
        api_keys: Arc::new(InMemoryApiKeyStore::new()),
    }
}

/// Builds a service bundle with one known user and workspace.
pub fn seeded_services() -> DomainServices {
    let store = Arc::new(InMemoryWorkspaceStore::new());
    let directory = InMemoryDirectory::new();
    directory.add_user("user-1").expect("seed user");
    directory.add_workspace("ws-1").expect("seed workspace");
    DomainServices {
        spaces: store.clone(),
        pages: store.clone(),
        comments: store.clone(),
        projects: store.clone(),
        tasks: store,
        directory: Arc::new(directory),
        api_keys: Arc::new(InMemoryApiKeyStore::new()),
    }
}

/// Builds a registry with auditing disabled.
pub fn test_registry() -> MethodRegistry {
    MethodRegistry::new(Arc::new(NoopAuditSink)).expect("registry builds")
}
