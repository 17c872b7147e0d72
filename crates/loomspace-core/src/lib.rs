// crates/loomspace-core/src/lib.rs
// ============================================================================
// Module: Loomspace Core
// Description: Domain records, service traits, and in-memory stores.
// Purpose: Provide the domain surface consumed by the MCP gateway.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Loomspace Core defines the domain records (spaces, pages, comments,
//! projects, tasks, API keys), the service traits the gateway dispatches
//! into, and in-memory reference implementations used by tests and local
//! deployments. Persistence backends implement the same traits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod memory;
pub mod services;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::DomainError;
pub use memory::InMemoryApiKeyStore;
pub use memory::InMemoryDirectory;
pub use memory::InMemoryWorkspaceStore;
pub use services::ApiKeyStore;
pub use services::CommentService;
pub use services::Directory;
pub use services::DomainServices;
pub use services::PageService;
pub use services::ProjectService;
pub use services::SpaceService;
pub use services::TaskService;
pub use types::ApiKeyRecord;
pub use types::Comment;
pub use types::NewApiKey;
pub use types::NewComment;
pub use types::NewPage;
pub use types::NewProject;
pub use types::NewSpace;
pub use types::NewTask;
pub use types::Page;
pub use types::PageUpdate;
pub use types::Project;
pub use types::Space;
pub use types::Task;
pub use types::TaskStatus;
pub use types::TaskUpdate;
