// crates/loomspace-core/src/memory.rs
// ============================================================================
// Module: In-Memory Stores
// Description: Reference implementations of the domain service traits.
// Purpose: Back tests and local deployments without a database.
// Dependencies: loomspace-core::services, loomspace-core::types
// ============================================================================

//! ## Overview
//! A single [`InMemoryWorkspaceStore`] implements all five domain traits so
//! cross-entity checks (page -> space, task -> project) stay consistent under
//! one lock. Identifiers are counter-derived (`page-0001`) so tests are
//! deterministic.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::DomainError;
use crate::services::ApiKeyStore;
use crate::services::CommentService;
use crate::services::Directory;
use crate::services::PageService;
use crate::services::ProjectService;
use crate::services::SpaceService;
use crate::services::TaskService;
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
use crate::types::TaskStatus;
use crate::types::TaskUpdate;

// ============================================================================
// SECTION: Workspace Store
// ============================================================================

/// Mutable state guarded by the store lock.
#[derive(Debug, Default)]
struct WorkspaceState {
    /// Spaces keyed by identifier.
    spaces: BTreeMap<String, Space>,
    /// Pages keyed by identifier.
    pages: BTreeMap<String, Page>,
    /// Comments keyed by identifier.
    comments: BTreeMap<String, Comment>,
    /// Projects keyed by identifier.
    projects: BTreeMap<String, Project>,
    /// Tasks keyed by identifier.
    tasks: BTreeMap<String, Task>,
    /// Next counter value per identifier prefix.
    counters: BTreeMap<&'static str, u64>,
}

impl WorkspaceState {
    /// Allocates the next identifier for a prefix (`page` -> `page-0001`).
    fn next_id(&mut self, prefix: &'static str) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{prefix}-{counter:04}")
    }
}

/// In-memory implementation of every domain service trait.
#[derive(Debug, Default)]
pub struct InMemoryWorkspaceStore {
    /// Shared mutable state.
    state: Mutex<WorkspaceState>,
}

impl InMemoryWorkspaceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store state, mapping poisoned locks to a storage error.
    fn lock(&self) -> Result<MutexGuard<'_, WorkspaceState>, DomainError> {
        self.state.lock().map_err(|_| DomainError::Storage("store lock poisoned".to_string()))
    }
}

impl SpaceService for InMemoryWorkspaceStore {
    fn create(&self, input: NewSpace) -> Result<Space, DomainError> {
        let mut state = self.lock()?;
        if state.spaces.values().any(|space| space.name == input.name) {
            return Err(DomainError::Conflict(format!("space name {} already exists", input.name)));
        }
        let space_id = state.next_id("space");
        let space = Space {
            space_id: space_id.clone(),
            name: input.name,
            description: input.description,
            created_at_ms: input.created_at_ms,
        };
        state.spaces.insert(space_id, space.clone());
        Ok(space)
    }

    fn list(&self) -> Result<Vec<Space>, DomainError> {
        let state = self.lock()?;
        Ok(state.spaces.values().cloned().collect())
    }

    fn exists(&self, space_id: &str) -> Result<bool, DomainError> {
        let state = self.lock()?;
        Ok(state.spaces.contains_key(space_id))
    }
}

impl PageService for InMemoryWorkspaceStore {
    fn create(&self, input: NewPage) -> Result<Page, DomainError> {
        let mut state = self.lock()?;
        if !state.spaces.contains_key(&input.space_id) {
            return Err(DomainError::NotFound(format!("space {} not found", input.space_id)));
        }
        let page_id = state.next_id("page");
        let page = Page {
            page_id: page_id.clone(),
            space_id: input.space_id,
            title: input.title,
            body: input.body,
            created_at_ms: input.created_at_ms,
            updated_at_ms: input.created_at_ms,
        };
        state.pages.insert(page_id, page.clone());
        Ok(page)
    }

    fn get(&self, page_id: &str) -> Result<Page, DomainError> {
        let state = self.lock()?;
        state
            .pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("page {page_id} not found")))
    }

    fn update(&self, page_id: &str, update: PageUpdate) -> Result<Page, DomainError> {
        let mut state = self.lock()?;
        let page = state
            .pages
            .get_mut(page_id)
            .ok_or_else(|| DomainError::NotFound(format!("page {page_id} not found")))?;
        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(body) = update.body {
            page.body = body;
        }
        page.updated_at_ms = update.updated_at_ms;
        Ok(page.clone())
    }

    fn delete(&self, page_id: &str) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        if state.pages.remove(page_id).is_none() {
            return Err(DomainError::NotFound(format!("page {page_id} not found")));
        }
        state.comments.retain(|_, comment| comment.page_id != page_id);
        Ok(())
    }

    fn list(&self, space_id: &str, limit: usize) -> Result<Vec<Page>, DomainError> {
        let state = self.lock()?;
        if !state.spaces.contains_key(space_id) {
            return Err(DomainError::NotFound(format!("space {space_id} not found")));
        }
        Ok(state
            .pages
            .values()
            .filter(|page| page.space_id == space_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl CommentService for InMemoryWorkspaceStore {
    fn create(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.lock()?;
        if !state.pages.contains_key(&input.page_id) {
            return Err(DomainError::NotFound(format!("page {} not found", input.page_id)));
        }
        let comment_id = state.next_id("comment");
        let comment = Comment {
            comment_id: comment_id.clone(),
            page_id: input.page_id,
            author_id: input.author_id,
            body: input.body,
            created_at_ms: input.created_at_ms,
        };
        state.comments.insert(comment_id, comment.clone());
        Ok(comment)
    }

    fn list(&self, page_id: &str) -> Result<Vec<Comment>, DomainError> {
        let state = self.lock()?;
        if !state.pages.contains_key(page_id) {
            return Err(DomainError::NotFound(format!("page {page_id} not found")));
        }
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.page_id == page_id)
            .cloned()
            .collect())
    }

    fn delete(&self, comment_id: &str) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        if state.comments.remove(comment_id).is_none() {
            return Err(DomainError::NotFound(format!("comment {comment_id} not found")));
        }
        Ok(())
    }
}

impl ProjectService for InMemoryWorkspaceStore {
    fn create(&self, input: NewProject) -> Result<Project, DomainError> {
        let mut state = self.lock()?;
        if !state.spaces.contains_key(&input.space_id) {
            return Err(DomainError::NotFound(format!("space {} not found", input.space_id)));
        }
        let project_id = state.next_id("project");
        let project = Project {
            project_id: project_id.clone(),
            space_id: input.space_id,
            name: input.name,
            created_at_ms: input.created_at_ms,
        };
        state.projects.insert(project_id, project.clone());
        Ok(project)
    }

    fn list(&self, space_id: Option<&str>) -> Result<Vec<Project>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .projects
            .values()
            .filter(|project| space_id.is_none_or(|id| project.space_id == id))
            .cloned()
            .collect())
    }

    fn exists(&self, project_id: &str) -> Result<bool, DomainError> {
        let state = self.lock()?;
        Ok(state.projects.contains_key(project_id))
    }
}

impl TaskService for InMemoryWorkspaceStore {
    fn create(&self, input: NewTask) -> Result<Task, DomainError> {
        let mut state = self.lock()?;
        if !state.projects.contains_key(&input.project_id) {
            return Err(DomainError::NotFound(format!("project {} not found", input.project_id)));
        }
        let task_id = state.next_id("task");
        let task = Task {
            task_id: task_id.clone(),
            project_id: input.project_id,
            title: input.title,
            status: TaskStatus::Open,
            assignee_id: input.assignee_id,
            created_at_ms: input.created_at_ms,
        };
        state.tasks.insert(task_id, task.clone());
        Ok(task)
    }

    fn update(&self, task_id: &str, update: TaskUpdate) -> Result<Task, DomainError> {
        let mut state = self.lock()?;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| DomainError::NotFound(format!("task {task_id} not found")))?;
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(assignee_id) = update.assignee_id {
            task.assignee_id = Some(assignee_id);
        }
        Ok(task.clone())
    }

    fn list(&self, project_id: &str) -> Result<Vec<Task>, DomainError> {
        let state = self.lock()?;
        if !state.projects.contains_key(project_id) {
            return Err(DomainError::NotFound(format!("project {project_id} not found")));
        }
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// SECTION: Directory
// ============================================================================

/// In-memory user/workspace directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    /// Known user identifiers.
    users: Mutex<BTreeSet<String>>,
    /// Known workspace identifiers.
    workspaces: Mutex<BTreeSet<String>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the directory lock is poisoned.
    pub fn add_user(&self, user_id: &str) -> Result<(), DomainError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| DomainError::Storage("directory lock poisoned".to_string()))?;
        users.insert(user_id.to_string());
        Ok(())
    }

    /// Registers a workspace identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the directory lock is poisoned.
    pub fn add_workspace(&self, workspace_id: &str) -> Result<(), DomainError> {
        let mut workspaces = self
            .workspaces
            .lock()
            .map_err(|_| DomainError::Storage("directory lock poisoned".to_string()))?;
        workspaces.insert(workspace_id.to_string());
        Ok(())
    }
}

impl Directory for InMemoryDirectory {
    fn user_exists(&self, user_id: &str) -> Result<bool, DomainError> {
        let users = self
            .users
            .lock()
            .map_err(|_| DomainError::Storage("directory lock poisoned".to_string()))?;
        Ok(users.contains(user_id))
    }

    fn workspace_exists(&self, workspace_id: &str) -> Result<bool, DomainError> {
        let workspaces = self
            .workspaces
            .lock()
            .map_err(|_| DomainError::Storage("directory lock poisoned".to_string()))?;
        Ok(workspaces.contains(workspace_id))
    }
}

// ============================================================================
// SECTION: API Key Store
// ============================================================================

/// In-memory API key persistence.
#[derive(Debug, Default)]
pub struct InMemoryApiKeyStore {
    /// Stored keys keyed by identifier.
    keys: Mutex<BTreeMap<String, ApiKeyRecord>>,
}

impl InMemoryApiKeyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all stored key records.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the store lock is poisoned.
    pub fn records(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let keys = self
            .keys
            .lock()
            .map_err(|_| DomainError::Storage("api key lock poisoned".to_string()))?;
        Ok(keys.values().cloned().collect())
    }
}

impl ApiKeyStore for InMemoryApiKeyStore {
    fn create(&self, input: NewApiKey) -> Result<ApiKeyRecord, DomainError> {
        let mut keys = self
            .keys
            .lock()
            .map_err(|_| DomainError::Storage("api key lock poisoned".to_string()))?;
        let duplicate = keys
            .values()
            .any(|key| key.workspace_id == input.workspace_id && key.name == input.name);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "api key {} already exists in workspace {}",
                input.name, input.workspace_id
            )));
        }
        let key_id = format!("key-{:04}", keys.len() + 1);
        let record = ApiKeyRecord {
            key_id: key_id.clone(),
            name: input.name,
            user_id: input.user_id,
            workspace_id: input.workspace_id,
            secret: input.secret,
            created_at_ms: input.created_at_ms,
        };
        keys.insert(key_id, record.clone());
        Ok(record)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
