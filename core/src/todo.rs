//! Entity model for the todo domain.
//!
//! A [`Todo`] is a single task record owned by a user. Records are created
//! from a [`CreateTodoRequest`] and modified through a [`TodoPatch`]; the
//! store assigns everything the caller is not allowed to choose (id, status,
//! timestamps, creating user).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user.
///
/// Users are external to this system; the id is only used to partition todo
/// collections and to record ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a `UserId` from a raw integer
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a todo item.
///
/// Ids are integers assigned at creation time from the wall clock (millisecond
/// precision) with a monotonic bump, so they are unique within a process and
/// sort in creation order. See `environment::WallClockIds`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw integer
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of a todo item.
///
/// Serialized in kebab-case (`"todo"`, `"in-progress"`, `"done"`), which is
/// also the persisted wire spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    /// Not started yet. Every record is created in this status.
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Priority of a todo item, set at creation and mutable via update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal
    Medium,
    /// Needs attention soon
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A single task record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned at creation
    pub id: TodoId,
    /// Display text
    pub title: String,
    /// Free-form detail text; empty when the creator supplied none
    #[serde(default)]
    pub description: String,
    /// Workflow status
    pub status: TodoStatus,
    /// Priority
    pub priority: Priority,
    /// User responsible for the task
    pub assigned_to: UserId,
    /// User who created the task; immutable after creation
    pub created_by: UserId,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update; equals `created_at` until the
    /// first update
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds the record for a freshly created todo.
    ///
    /// Status is forced to [`TodoStatus::Todo`] and both timestamps are set
    /// to the same instant, per the creation contract.
    #[must_use]
    pub fn from_request(
        id: TodoId,
        request: CreateTodoRequest,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description.unwrap_or_default(),
            status: TodoStatus::Todo,
            priority: request.priority,
            assigned_to: request.assigned_to,
            created_by,
            created_at,
            updated_at: created_at,
        }
    }

    /// Merges a patch into this record, refreshing `updated_at`.
    ///
    /// Identity fields (`id`, `created_by`, `created_at`) are not
    /// representable in [`TodoPatch`] and therefore cannot change.
    pub fn apply_patch(&mut self, patch: TodoPatch, updated_at: DateTime<Utc>) {
        let TodoPatch {
            title,
            description,
            status,
            priority,
            assigned_to,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(assigned_to) = assigned_to {
            self.assigned_to = assigned_to;
        }
        self.updated_at = updated_at;
    }
}

/// Input for creating a todo.
///
/// Everything else on [`Todo`] is store-assigned: id, status, timestamps and
/// the creating user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    /// Display text. Stored as-is; this layer enforces no non-empty rule.
    pub title: String,
    /// Optional detail text
    #[serde(default)]
    pub description: Option<String>,
    /// Initial priority
    pub priority: Priority,
    /// User responsible for the task
    pub assigned_to: UserId,
}

impl CreateTodoRequest {
    /// Creates a request with no description
    #[must_use]
    pub fn new(title: impl Into<String>, priority: Priority, assigned_to: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            assigned_to,
        }
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a todo.
///
/// Only the mutable fields exist here; a payload carrying `id`, `createdBy`
/// or timestamps deserializes with those entries ignored, so identity fields
/// can never be rewritten through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// New display text
    #[serde(default)]
    pub title: Option<String>,
    /// New detail text
    #[serde(default)]
    pub description: Option<String>,
    /// New workflow status
    #[serde(default)]
    pub status: Option<TodoStatus>,
    /// New priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// New responsible user
    #[serde(default)]
    pub assigned_to: Option<UserId>,
}

impl TodoPatch {
    /// Creates an empty patch
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            assigned_to: None,
        }
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the responsible user
    #[must_use]
    pub const fn with_assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Returns `true` if the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap()
    }

    #[test]
    fn status_wire_spelling_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TodoStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&TodoStatus::Todo).unwrap(), "\"todo\"");
        assert_eq!(serde_json::to_string(&TodoStatus::Done).unwrap(), "\"done\"");
        assert_eq!(
            serde_json::from_str::<TodoStatus>("\"in-progress\"").unwrap(),
            TodoStatus::InProgress
        );
    }

    #[test]
    fn priority_wire_spelling_is_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::from_str::<Priority>("\"medium\"").unwrap(),
            Priority::Medium
        );
    }

    #[test]
    fn from_request_forces_status_and_equal_timestamps() {
        let request = CreateTodoRequest::new("Buy milk", Priority::Low, UserId::new(1));
        let todo = Todo::from_request(TodoId::new(42), request, UserId::new(7), t0());

        assert_eq!(todo.status, TodoStatus::Todo);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_eq!(todo.created_by, UserId::new(7));
        assert_eq!(todo.description, "");
    }

    #[test]
    fn from_request_keeps_empty_title() {
        let request = CreateTodoRequest::new("", Priority::Medium, UserId::new(1));
        let todo = Todo::from_request(TodoId::new(1), request, UserId::new(1), t0());
        assert_eq!(todo.title, "");
    }

    #[test]
    fn apply_patch_merges_only_supplied_fields() {
        let request = CreateTodoRequest::new("Buy milk", Priority::Low, UserId::new(1))
            .with_description("2 liters");
        let mut todo = Todo::from_request(TodoId::new(1), request, UserId::new(1), t0());

        let later = t0() + chrono::Duration::seconds(5);
        todo.apply_patch(TodoPatch::new().with_status(TodoStatus::Done), later);

        assert_eq!(todo.status, TodoStatus::Done);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2 liters");
        assert_eq!(todo.updated_at, later);
        assert_eq!(todo.created_at, t0());
    }

    #[test]
    fn patch_payload_ignores_identity_fields() {
        // A client sending id/createdBy in the update body must not be able
        // to rewrite them.
        let patch: TodoPatch = serde_json::from_str(
            r#"{"id": 999, "created_by": 999, "status": "done"}"#,
        )
        .unwrap();

        assert_eq!(patch, TodoPatch::new().with_status(TodoStatus::Done));
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(TodoPatch::new().is_empty());
        assert!(!TodoPatch::new().with_title("x").is_empty());
    }

    #[test]
    fn todo_round_trips_through_json() {
        let request = CreateTodoRequest::new("Write report", Priority::High, UserId::new(2))
            .with_description("Q3 numbers");
        let todo = Todo::from_request(TodoId::new(1_700_000_000_000), request, UserId::new(2), t0());

        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }
}
