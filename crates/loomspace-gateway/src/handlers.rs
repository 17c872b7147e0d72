// crates/loomspace-gateway/src/handlers.rs
// ============================================================================
// Module: Method Handlers
// Description: Per-method handler functions over the domain services.
// Purpose: Bind each registered method to a thin domain-service wrapper.
// Dependencies: loomspace-core, loomspace-contract, serde_json
// ============================================================================

//! ## Overview
//! One handler per [`MethodName`], bound into the registry through
//! [`handler_for`]. Handlers receive schema-validated params, so typed
//! deserialization failures here are internal errors, not caller errors.
//! All handlers are thin wrappers: deserialize, call the service trait,
//! serialize the record.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use loomspace_contract::MethodName;
use loomspace_core::DomainError;
use loomspace_core::DomainServices;
use loomspace_core::NewComment;
use loomspace_core::NewPage;
use loomspace_core::NewProject;
use loomspace_core::NewSpace;
use loomspace_core::NewTask;
use loomspace_core::PageUpdate;
use loomspace_core::TaskStatus;
use loomspace_core::TaskUpdate;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::registry::CallContext;

/// Default page size for list-style methods.
const DEFAULT_LIST_LIMIT: usize = 50;

// ============================================================================
// SECTION: Handler Binding
// ============================================================================

/// Handler outcome distinguishing domain failures from internal ones.
#[derive(Debug)]
pub enum HandlerFailure {
    /// Expected, caller-correctable domain failure.
    Domain(DomainError),
    /// Unexpected failure; detail is audited, never returned to the caller.
    Internal(String),
}

impl From<DomainError> for HandlerFailure {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

/// Handler function signature shared by every registered method.
pub type MethodHandler =
    fn(&DomainServices, &CallContext, &Value) -> Result<Value, HandlerFailure>;

/// Returns the handler bound to a method.
///
/// The match is exhaustive so adding a [`MethodName`] variant without a
/// handler fails to compile.
#[must_use]
pub const fn handler_for(name: MethodName) -> MethodHandler {
    match name {
        MethodName::SystemPing => system_ping,
        MethodName::SystemInfo => system_info,
        MethodName::SpaceCreate => space_create,
        MethodName::SpaceList => space_list,
        MethodName::PageCreate => page_create,
        MethodName::PageGet => page_get,
        MethodName::PageUpdate => page_update,
        MethodName::PageDelete => page_delete,
        MethodName::PageList => page_list,
        MethodName::CommentCreate => comment_create,
        MethodName::CommentList => comment_list,
        MethodName::CommentDelete => comment_delete,
        MethodName::ProjectCreate => project_create,
        MethodName::ProjectList => project_list,
        MethodName::TaskCreate => task_create,
        MethodName::TaskUpdate => task_update,
        MethodName::TaskList => task_list,
    }
}

// ============================================================================
// SECTION: System Handlers
// ============================================================================

/// Handles `system.ping`.
fn system_ping(
    _services: &DomainServices,
    _context: &CallContext,
    _params: &Value,
) -> Result<Value, HandlerFailure> {
    Ok(json!({ "pong": true, "time_ms": now_ms() }))
}

/// Handles `system.info`.
fn system_info(
    _services: &DomainServices,
    _context: &CallContext,
    _params: &Value,
) -> Result<Value, HandlerFailure> {
    let methods: Vec<&str> = MethodName::all().iter().map(|method| method.as_str()).collect();
    Ok(json!({
        "name": "loomspace-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "methods": methods
    }))
}

// ============================================================================
// SECTION: Space Handlers
// ============================================================================

/// Params for `space.create`.
#[derive(Debug, Deserialize)]
struct SpaceCreateParams {
    /// Space display name.
    name: String,
    /// Optional description.
    #[serde(default)]
    description: Option<String>,
}

/// Handles `space.create`.
fn space_create(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: SpaceCreateParams = typed_params(params)?;
    let space = services.spaces.create(NewSpace {
        name: params.name,
        description: params.description,
        created_at_ms: now_ms(),
    })?;
    wrap("space", &space)
}

/// Handles `space.list`.
fn space_list(
    services: &DomainServices,
    _context: &CallContext,
    _params: &Value,
) -> Result<Value, HandlerFailure> {
    let spaces = services.spaces.list()?;
    wrap("spaces", &spaces)
}

// ============================================================================
// SECTION: Page Handlers
// ============================================================================

/// Params for `page.create`.
#[derive(Debug, Deserialize)]
struct PageCreateParams {
    /// Owning space identifier.
    space_id: String,
    /// Page title.
    title: String,
    /// Page body; empty when omitted.
    #[serde(default)]
    body: String,
}

/// Handles `page.create`.
fn page_create(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageCreateParams = typed_params(params)?;
    let page = services.pages.create(NewPage {
        space_id: params.space_id,
        title: params.title,
        body: params.body,
        created_at_ms: now_ms(),
    })?;
    wrap("page", &page)
}

/// Params for methods addressing a single page.
#[derive(Debug, Deserialize)]
struct PageIdParams {
    /// Page identifier.
    page_id: String,
}

/// Handles `page.get`.
fn page_get(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageIdParams = typed_params(params)?;
    let page = services.pages.get(&params.page_id)?;
    wrap("page", &page)
}

/// Params for `page.update`.
#[derive(Debug, Deserialize)]
struct PageUpdateParams {
    /// Page identifier.
    page_id: String,
    /// Replacement title.
    #[serde(default)]
    title: Option<String>,
    /// Replacement body.
    #[serde(default)]
    body: Option<String>,
}

/// Handles `page.update`.
fn page_update(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageUpdateParams = typed_params(params)?;
    let page = services.pages.update(
        &params.page_id,
        PageUpdate {
            title: params.title,
            body: params.body,
            updated_at_ms: now_ms(),
        },
    )?;
    wrap("page", &page)
}

/// Handles `page.delete`.
fn page_delete(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageIdParams = typed_params(params)?;
    services.pages.delete(&params.page_id)?;
    Ok(json!({ "deleted": true, "page_id": params.page_id }))
}

/// Params for `page.list`.
#[derive(Debug, Deserialize)]
struct PageListParams {
    /// Owning space identifier.
    space_id: String,
    /// Maximum number of pages to return.
    #[serde(default)]
    limit: Option<usize>,
}

/// Handles `page.list`.
fn page_list(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageListParams = typed_params(params)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let pages = services.pages.list(&params.space_id, limit)?;
    wrap("pages", &pages)
}

// ============================================================================
// SECTION: Comment Handlers
// ============================================================================

/// Params for `comment.create`.
#[derive(Debug, Deserialize)]
struct CommentCreateParams {
    /// Page the comment is attached to.
    page_id: String,
    /// Comment body.
    body: String,
    /// Optional author identifier.
    #[serde(default)]
    author_id: Option<String>,
}

/// Handles `comment.create`.
fn comment_create(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: CommentCreateParams = typed_params(params)?;
    let comment = services.comments.create(NewComment {
        page_id: params.page_id,
        author_id: params.author_id,
        body: params.body,
        created_at_ms: now_ms(),
    })?;
    wrap("comment", &comment)
}

/// Handles `comment.list`.
fn comment_list(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: PageIdParams = typed_params(params)?;
    let comments = services.comments.list(&params.page_id)?;
    wrap("comments", &comments)
}

/// Params for `comment.delete`.
#[derive(Debug, Deserialize)]
struct CommentIdParams {
    /// Comment identifier.
    comment_id: String,
}

/// Handles `comment.delete`.
fn comment_delete(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: CommentIdParams = typed_params(params)?;
    services.comments.delete(&params.comment_id)?;
    Ok(json!({ "deleted": true, "comment_id": params.comment_id }))
}

// ============================================================================
// SECTION: Project Handlers
// ============================================================================

/// Params for `project.create`.
#[derive(Debug, Deserialize)]
struct ProjectCreateParams {
    /// Owning space identifier.
    space_id: String,
    /// Project name.
    name: String,
}

/// Handles `project.create`.
fn project_create(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: ProjectCreateParams = typed_params(params)?;
    let project = services.projects.create(NewProject {
        space_id: params.space_id,
        name: params.name,
        created_at_ms: now_ms(),
    })?;
    wrap("project", &project)
}

/// Params for `project.list`.
#[derive(Debug, Deserialize)]
struct ProjectListParams {
    /// Optional space scope.
    #[serde(default)]
    space_id: Option<String>,
}

/// Handles `project.list`.
fn project_list(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: ProjectListParams = typed_params(params)?;
    let projects = services.projects.list(params.space_id.as_deref())?;
    wrap("projects", &projects)
}

// ============================================================================
// SECTION: Task Handlers
// ============================================================================

/// Params for `task.create`.
#[derive(Debug, Deserialize)]
struct TaskCreateParams {
    /// Owning project identifier.
    project_id: String,
    /// Task title.
    title: String,
    /// Optional assignee.
    #[serde(default)]
    assignee_id: Option<String>,
}

/// Handles `task.create`.
fn task_create(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: TaskCreateParams = typed_params(params)?;
    let task = services.tasks.create(NewTask {
        project_id: params.project_id,
        title: params.title,
        assignee_id: params.assignee_id,
        created_at_ms: now_ms(),
    })?;
    wrap("task", &task)
}

/// Params for `task.update`.
#[derive(Debug, Deserialize)]
struct TaskUpdateParams {
    /// Task identifier.
    task_id: String,
    /// Replacement title.
    #[serde(default)]
    title: Option<String>,
    /// Replacement status.
    #[serde(default)]
    status: Option<TaskStatus>,
    /// Replacement assignee.
    #[serde(default)]
    assignee_id: Option<String>,
}

/// Handles `task.update`.
fn task_update(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: TaskUpdateParams = typed_params(params)?;
    let task = services.tasks.update(
        &params.task_id,
        TaskUpdate {
            title: params.title,
            status: params.status,
            assignee_id: params.assignee_id,
        },
    )?;
    wrap("task", &task)
}

/// Params for `task.list`.
#[derive(Debug, Deserialize)]
struct TaskListParams {
    /// Owning project identifier.
    project_id: String,
}

/// Handles `task.list`.
fn task_list(
    services: &DomainServices,
    _context: &CallContext,
    params: &Value,
) -> Result<Value, HandlerFailure> {
    let params: TaskListParams = typed_params(params)?;
    let tasks = services.tasks.list(&params.project_id)?;
    wrap("tasks", &tasks)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes schema-validated params into a typed struct.
fn typed_params<T: for<'de> Deserialize<'de>>(params: &Value) -> Result<T, HandlerFailure> {
    serde_json::from_value(params.clone())
        .map_err(|err| HandlerFailure::Internal(format!("params deserialization failed: {err}")))
}

/// Serializes a record under a single result key.
fn wrap<T: serde::Serialize>(key: &str, value: &T) -> Result<Value, HandlerFailure> {
    let rendered = serde_json::to_value(value)
        .map_err(|err| HandlerFailure::Internal(format!("result serialization failed: {err}")))?;
    Ok(json!({ key: rendered }))
}

/// Returns the current wall-clock time in milliseconds since the epoch.
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
