/// Task model and database operations
///
/// This module provides the Task model: a unit of work owned by exactly one
/// user. Every query is scoped by `user_id`, so a caller can only ever see or
/// mutate their own tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('PENDING', 'IN_PROGRESS', 'COMPLETED');
/// CREATE TYPE task_priority AS ENUM ('LOW', 'MEDIUM', 'HIGH');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'PENDING',
///     priority task_priority NOT NULL DEFAULT 'MEDIUM',
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{Task, UpdateTask, TaskStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid, task_id: Uuid) -> Result<(), sqlx::Error> {
/// let tasks = Task::list_by_user(&pool, user_id).await?;
///
/// Task::update(&pool, task_id, user_id, UpdateTask {
///     status: Some(TaskStatus::Completed),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task progress status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// All statuses in display order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Converts status to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(TaskPriority::Low),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "HIGH" => Ok(TaskPriority::High),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Returned when parsing an unknown status or priority string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Error returned when a due date string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid due date: {0:?}")]
pub struct DueDateError(pub String);

/// Parses a client-supplied due date
///
/// Accepts an RFC 3339 timestamp (`2025-03-15T10:00:00Z`,
/// `2025-03-15T10:00:00+02:00`), a timestamp without offset (read as UTC),
/// or a bare date (`2025-03-15`, read as UTC midnight).
///
/// # Example
///
/// ```
/// use taskflow_shared::models::task::parse_due_date;
///
/// let due = parse_due_date("2025-03-15").unwrap();
/// assert_eq!(due.to_rfc3339(), "2025-03-15T00:00:00+00:00");
/// assert!(parse_due_date("next tuesday").is_err());
/// ```
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, DueDateError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(DueDateError(input.to_string()))
}

/// Task model
///
/// Serialized with camelCase field names (`userId`, `dueDate`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning user
    pub user_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `user_id` always comes from the authenticated session, never from the
/// request body.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for updating a task
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTask {
    /// Names of the fields whose value would actually change on `current`
    ///
    /// Field names use the camelCase wire form.
    pub fn changed_fields(&self, current: &Task) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if self.title.as_ref().is_some_and(|t| *t != current.title) {
            changed.push("title");
        }
        if self
            .description
            .as_ref()
            .is_some_and(|d| Some(d) != current.description.as_ref())
        {
            changed.push("description");
        }
        if self.status.is_some_and(|s| s != current.status) {
            changed.push("status");
        }
        if self.priority.is_some_and(|p| p != current.priority) {
            changed.push("priority");
        }
        if self.due_date.is_some_and(|d| Some(d) != current.due_date) {
            changed.push("dueDate");
        }

        changed
    }

    /// Applies the set fields to `task` in place, bumping `updated_at`
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
    }
}

const TASK_COLUMNS: &str =
    "id, title, description, status, priority, due_date, user_id, created_at, updated_at";

impl Task {
    /// Creates a new task
    ///
    /// The database generates `id`, `created_at` and `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO tasks (user_id, title, description, status, priority, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(data.user_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.due_date)
            .fetch_one(pool)
            .await
    }

    /// Finds a task by ID, scoped to its owner
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lists all tasks owned by a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Updates a task owned by `user_id`
    ///
    /// Returns `None` if no such task exists for this user.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                due_date = COALESCE($7, due_date),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a task owned by `user_id`, returning the deleted row
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "DELETE FROM tasks WHERE id = $1 AND user_id = $2 RETURNING {TASK_COLUMNS}"
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
