// crates/loomspace-core/src/services.rs
// ============================================================================
// Module: Service Traits
// Description: Trait seams between the MCP gateway and domain backends.
// Purpose: Let the gateway dispatch methods without knowing the store.
// Dependencies: loomspace-core::types, loomspace-core::error
// ============================================================================

//! ## Overview
//! One trait per domain plus the directory and API-key seams used by the
//! bootstrap endpoint. All traits are object-safe and `Send + Sync` so they
//! can be shared across concurrent gateway requests behind `Arc`.
//!
//! ## Invariants
//! - Implementations are individually safe for concurrent invocation.
//! - Operations are terminal: no implementation retries internally.

use std::sync::Arc;

use crate::error::DomainError;
use crate::types::ApiKeyRecord;
use crate::types::Comment;
use crate::types::NewApiKey;
use crate::types::NewComment;
use crate::types::NewPage;
use crate::types::NewProject;
use crate::types::NewSpace;
use crate::types::NewTask;
use crate::types::Page;
use crate::types::PageUpdate;
use crate::types::Project;
use crate::types::Space;
use crate::types::Task;
use crate::types::TaskUpdate;

// ============================================================================
// SECTION: Domain Traits
// ============================================================================

/// Space CRUD operations.
pub trait SpaceService: Send + Sync {
    /// Creates a space and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the space cannot be created.
    fn create(&self, input: NewSpace) -> Result<Space, DomainError>;

    /// Lists all spaces.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store cannot be read.
    fn list(&self) -> Result<Vec<Space>, DomainError>;

    /// Returns true when the space exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store cannot be read.
    fn exists(&self, space_id: &str) -> Result<bool, DomainError>;
}

/// Page CRUD operations.
pub trait PageService: Send + Sync {
    /// Creates a page and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the space is unknown.
    fn create(&self, input: NewPage) -> Result<Page, DomainError>;

    /// Fetches a page by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the page is unknown.
    fn get(&self, page_id: &str) -> Result<Page, DomainError>;

    /// Applies a partial update and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the page is unknown.
    fn update(&self, page_id: &str, update: PageUpdate) -> Result<Page, DomainError>;

    /// Deletes a page and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the page is unknown.
    fn delete(&self, page_id: &str) -> Result<(), DomainError>;

    /// Lists pages in a space, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the space is unknown.
    fn list(&self, space_id: &str, limit: usize) -> Result<Vec<Page>, DomainError>;
}

/// Comment operations.
pub trait CommentService: Send + Sync {
    /// Creates a comment and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the page is unknown.
    fn create(&self, input: NewComment) -> Result<Comment, DomainError>;

    /// Lists comments on a page in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the page is unknown.
    fn list(&self, page_id: &str) -> Result<Vec<Comment>, DomainError>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the comment is unknown.
    fn delete(&self, comment_id: &str) -> Result<(), DomainError>;
}

/// Project operations.
pub trait ProjectService: Send + Sync {
    /// Creates a project and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the space is unknown.
    fn create(&self, input: NewProject) -> Result<Project, DomainError>;

    /// Lists projects, optionally scoped to a space.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store cannot be read.
    fn list(&self, space_id: Option<&str>) -> Result<Vec<Project>, DomainError>;

    /// Returns true when the project exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store cannot be read.
    fn exists(&self, project_id: &str) -> Result<bool, DomainError>;
}

/// Task operations.
pub trait TaskService: Send + Sync {
    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the project is unknown.
    fn create(&self, input: NewTask) -> Result<Task, DomainError>;

    /// Applies a partial update and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the task is unknown.
    fn update(&self, task_id: &str, update: TaskUpdate) -> Result<Task, DomainError>;

    /// Lists tasks in a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the project is unknown.
    fn list(&self, project_id: &str) -> Result<Vec<Task>, DomainError>;
}

// ============================================================================
// SECTION: Bootstrap Traits
// ============================================================================

/// User and workspace existence checks used before workspace resolution.
pub trait Directory: Send + Sync {
    /// Returns true when the user exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the directory cannot be read.
    fn user_exists(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Returns true when the workspace exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the directory cannot be read.
    fn workspace_exists(&self, workspace_id: &str) -> Result<bool, DomainError>;
}

/// API key persistence used by the bootstrap endpoint.
pub trait ApiKeyStore: Send + Sync {
    /// Persists a new API key and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] when the key name is already taken
    /// within the workspace.
    fn create(&self, input: NewApiKey) -> Result<ApiKeyRecord, DomainError>;
}

// ============================================================================
// SECTION: Service Bundle
// ============================================================================

/// Shared handles to every service the gateway dispatches into.
#[derive(Clone)]
pub struct DomainServices {
    /// Space operations.
    pub spaces: Arc<dyn SpaceService>,
    /// Page operations.
    pub pages: Arc<dyn PageService>,
    /// Comment operations.
    pub comments: Arc<dyn CommentService>,
    /// Project operations.
    pub projects: Arc<dyn ProjectService>,
    /// Task operations.
    pub tasks: Arc<dyn TaskService>,
    /// User/workspace directory.
    pub directory: Arc<dyn Directory>,
    /// API key persistence.
    pub api_keys: Arc<dyn ApiKeyStore>,
}
