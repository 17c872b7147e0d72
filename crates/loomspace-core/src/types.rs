// crates/loomspace-core/src/types.rs
// ============================================================================
// Module: Domain Records
// Description: Serializable record types for the Loomspace domain.
// Purpose: Define the payload shapes exchanged between gateway and services.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Record types for spaces, pages, comments, projects, tasks, and API keys,
//! plus the `New*`/`*Update` input shapes consumed by service traits.
//! Timestamps are caller-supplied milliseconds since the Unix epoch so the
//! stores never read the wall clock themselves.

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Records
// ============================================================================

/// A space groups pages and projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Space identifier.
    pub space_id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// A document page within a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page identifier.
    pub page_id: String,
    /// Owning space identifier.
    pub space_id: String,
    /// Page title.
    pub title: String,
    /// Page body (markdown).
    pub body: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
    /// Last update time (milliseconds since epoch).
    pub updated_at_ms: i64,
}

/// A comment attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub comment_id: String,
    /// Page the comment is attached to.
    pub page_id: String,
    /// Optional author identifier.
    pub author_id: Option<String>,
    /// Comment body.
    pub body: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// A project within a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub project_id: String,
    /// Owning space identifier.
    pub space_id: String,
    /// Project name.
    pub name: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started.
    Open,
    /// Work in progress.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// A task within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub task_id: String,
    /// Owning project identifier.
    pub project_id: String,
    /// Task title.
    pub title: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Optional assignee user identifier.
    pub assignee_id: Option<String>,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// A persisted API key record created via the bootstrap endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    /// Key identifier.
    pub key_id: String,
    /// Human-readable key name.
    pub name: String,
    /// Owning user identifier.
    pub user_id: String,
    /// Owning workspace identifier.
    pub workspace_id: String,
    /// Key secret (hex).
    pub secret: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

// ============================================================================
// SECTION: Input Shapes
// ============================================================================

/// Input for creating a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpace {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Input for creating a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    /// Owning space identifier.
    pub space_id: String,
    /// Page title.
    pub title: String,
    /// Page body (markdown).
    pub body: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Partial update for a page; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub body: Option<String>,
    /// Update time (milliseconds since epoch).
    pub updated_at_ms: i64,
}

/// Input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Page the comment is attached to.
    pub page_id: String,
    /// Optional author identifier.
    pub author_id: Option<String>,
    /// Comment body.
    pub body: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Owning space identifier.
    pub space_id: String,
    /// Project name.
    pub name: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Owning project identifier.
    pub project_id: String,
    /// Task title.
    pub title: String,
    /// Optional assignee user identifier.
    pub assignee_id: Option<String>,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}

/// Partial update for a task; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement assignee user identifier.
    pub assignee_id: Option<String>,
}

/// Input for creating an API key via the bootstrap endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApiKey {
    /// Human-readable key name.
    pub name: String,
    /// Owning user identifier.
    pub user_id: String,
    /// Owning workspace identifier.
    pub workspace_id: String,
    /// Key secret (hex).
    pub secret: String,
    /// Creation time (milliseconds since epoch).
    pub created_at_ms: i64,
}
