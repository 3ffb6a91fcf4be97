/// Task endpoints
///
/// All endpoints require JWT authentication. The owning user always comes
/// from the session; a `userId` in the request body is ignored.
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create task
/// - `GET /api/tasks` - List the caller's tasks, newest first
/// - `PATCH /api/tasks/:id` - Update one of the caller's tasks
/// - `DELETE /api/tasks/:id` - Delete one of the caller's tasks
///
/// Bodies are read as raw bytes and parsed here, so a malformed payload
/// fails the same way a storage error does: 500 with a fixed message.
/// Every successful operation submits an activity entry; logging never
/// changes the response.

use crate::{
    app::AppState,
    client::ClientInfo,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use taskflow_shared::{
    activity::{
        ActivityEntry, ActivityEvent, PriorityChanged, StatusChanged, TaskCreated, TaskDeleted,
        TaskUpdated, TasksFetched,
    },
    auth::context::AuthContext,
    models::task::{parse_due_date, CreateTask, DueDateError, Task, TaskPriority, TaskStatus, UpdateTask},
};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

const CREATE_FAILED: &str = "Error creating task";
const FETCH_FAILED: &str = "Error fetching tasks";
const UPDATE_FAILED: &str = "Error updating task";
const DELETE_FAILED: &str = "Error deleting task";
const NOT_FOUND: &str = "Task not found";

/// Why a request body could not become a task
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid task fields: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    DueDate(#[from] DueDateError),
}

/// Create task request
///
/// Unknown fields are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Defaults to `PENDING`
    pub status: Option<TaskStatus>,

    /// Defaults to `MEDIUM`
    pub priority: Option<TaskPriority>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`; null or blank means no due date
    pub due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Parses and validates a raw body, attributing the task to `user_id`
    pub fn parse(body: &[u8], user_id: Uuid) -> Result<CreateTask, PayloadError> {
        let request: Self = serde_json::from_slice(body)?;
        request.validate()?;

        let due_date = request
            .due_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(parse_due_date)
            .transpose()?;

        Ok(CreateTask {
            user_id,
            title: request.title,
            description: request.description,
            status: request.status.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            due_date,
        })
    }
}

/// Update task request
///
/// Absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
}

impl UpdateTaskRequest {
    /// Parses and validates a raw body
    pub fn parse(body: &[u8]) -> Result<UpdateTask, PayloadError> {
        let request: Self = serde_json::from_slice(body)?;
        request.validate()?;

        let due_date = request
            .due_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(parse_due_date)
            .transpose()?;

        Ok(UpdateTask {
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            due_date,
        })
    }
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "priority": "LOW",
///   "dueDate": "2025-03-15"
/// }
/// ```
///
/// # Response
///
/// The created task:
///
/// ```json
/// {
///   "id": "6f1c2a0e-...",
///   "title": "Buy milk",
///   "description": null,
///   "status": "PENDING",
///   "priority": "LOW",
///   "dueDate": "2025-03-15T00:00:00Z",
///   "userId": "0b4c7e22-...",
///   "createdAt": "...",
///   "updatedAt": "..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session (body is never read)
/// - `500 Internal Server Error`: `"Error creating task"`
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Task>> {
    let data = CreateTaskRequest::parse(&body, auth.user_id)
        .map_err(|e| ApiError::internal(CREATE_FAILED, e))?;

    let task = state
        .tasks
        .create(data)
        .await
        .map_err(|e| ApiError::internal(CREATE_FAILED, e))?;

    info!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    let client = ClientInfo::from_headers(&headers);
    state.activity.log(
        ActivityEntry::new(
            auth.user_id,
            ActivityEvent::TaskCreate(TaskCreated {
                task_id: task.id,
                title: task.title.clone(),
                due_date: task.due_date,
            }),
        )
        .with_client(client.ip_address, client.user_agent),
    );

    Ok(Json(task))
}

/// List tasks
///
/// Returns the caller's tasks ordered by `createdAt`, newest first.
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `500 Internal Server Error`: `"Error fetching tasks"`
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .tasks
        .list_by_user(auth.user_id)
        .await
        .map_err(|e| ApiError::internal(FETCH_FAILED, e))?;

    debug!(user_id = %auth.user_id, count = tasks.len(), "Tasks fetched");

    let client = ClientInfo::from_headers(&headers);
    state.activity.log(
        ActivityEntry::new(
            auth.user_id,
            ActivityEvent::TaskFetch(TasksFetched {
                total_tasks_fetched: tasks.len(),
            }),
        )
        .with_client(client.ip_address, client.user_agent),
    );

    Ok(Json(tasks))
}

/// Update task
///
/// Logs `TASK_UPDATE` with the fields that actually changed, plus
/// `STATUS_CHANGE` and `PRIORITY_CHANGE` when those moved.
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such task for this user
/// - `500 Internal Server Error`: `"Error updating task"`
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Task>> {
    let data = UpdateTaskRequest::parse(&body).map_err(|e| ApiError::internal(UPDATE_FAILED, e))?;

    let existing = state
        .tasks
        .find(task_id, auth.user_id)
        .await
        .map_err(|e| ApiError::internal(UPDATE_FAILED, e))?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

    let changed_fields = data.changed_fields(&existing);

    let task = state
        .tasks
        .update(task_id, auth.user_id, data)
        .await
        .map_err(|e| ApiError::internal(UPDATE_FAILED, e))?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

    info!(task_id = %task.id, user_id = %auth.user_id, ?changed_fields, "Task updated");

    let client = ClientInfo::from_headers(&headers);
    let mut events = vec![ActivityEvent::TaskUpdate(TaskUpdated {
        task_id: task.id,
        changed_fields: changed_fields.iter().map(|f| f.to_string()).collect(),
    })];

    if existing.status != task.status {
        events.push(ActivityEvent::StatusChange(StatusChanged {
            task_id: task.id,
            old_status: existing.status,
            new_status: task.status,
        }));
    }

    if existing.priority != task.priority {
        events.push(ActivityEvent::PriorityChange(PriorityChanged {
            task_id: task.id,
            old_priority: existing.priority,
            new_priority: task.priority,
        }));
    }

    for event in events {
        state.activity.log(
            ActivityEntry::new(auth.user_id, event)
                .with_client(client.ip_address.clone(), client.user_agent.clone()),
        );
    }

    Ok(Json(task))
}

/// Delete task
///
/// # Response
///
/// ```json
/// { "message": "Task deleted" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: No such task for this user
/// - `500 Internal Server Error`: `"Error deleting task"`
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<Json<JsonValue>> {
    let task = state
        .tasks
        .delete(task_id, auth.user_id)
        .await
        .map_err(|e| ApiError::internal(DELETE_FAILED, e))?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

    info!(task_id = %task.id, user_id = %auth.user_id, "Task deleted");

    let client = ClientInfo::from_headers(&headers);
    state.activity.log(
        ActivityEntry::new(
            auth.user_id,
            ActivityEvent::TaskDelete(TaskDeleted {
                task_id: task.id,
                title: task.title,
            }),
        )
        .with_client(client.ip_address, client.user_agent),
    );

    Ok(Json(json!({ "message": "Task deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_and_ignores_body_user() {
        let user_id = Uuid::new_v4();
        let body = json!({
            "title": "Buy milk",
            "priority": "LOW",
            "userId": Uuid::new_v4(),
        });

        let data = CreateTaskRequest::parse(body.to_string().as_bytes(), user_id).unwrap();

        assert_eq!(data.user_id, user_id);
        assert_eq!(data.title, "Buy milk");
        assert_eq!(data.status, TaskStatus::Pending);
        assert_eq!(data.priority, TaskPriority::Low);
        assert_eq!(data.due_date, None);
    }

    #[test]
    fn test_create_null_due_date_is_absent() {
        let body = json!({ "title": "x", "dueDate": null });
        let data = CreateTaskRequest::parse(body.to_string().as_bytes(), Uuid::new_v4()).unwrap();
        assert_eq!(data.due_date, None);
    }

    #[test]
    fn test_blank_due_date_is_absent() {
        let user_id = Uuid::new_v4();

        let data = CreateTaskRequest::parse(br#"{"title":"x","dueDate":""}"#, user_id).unwrap();
        assert_eq!(data.due_date, None);

        let data = CreateTaskRequest::parse(br#"{"title":"x","dueDate":"   "}"#, user_id).unwrap();
        assert_eq!(data.due_date, None);

        let data = UpdateTaskRequest::parse(br#"{"dueDate":""}"#).unwrap();
        assert_eq!(data.due_date, None);
    }

    #[test]
    fn test_create_rejects_bad_payloads() {
        let user_id = Uuid::new_v4();

        assert!(matches!(
            CreateTaskRequest::parse(b"not json", user_id),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            CreateTaskRequest::parse(br#"{"description":"no title"}"#, user_id),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            CreateTaskRequest::parse(br#"{"title":""}"#, user_id),
            Err(PayloadError::Validation(_))
        ));
        assert!(matches!(
            CreateTaskRequest::parse(br#"{"title":"x","dueDate":"tomorrow"}"#, user_id),
            Err(PayloadError::DueDate(_))
        ));
        assert!(matches!(
            CreateTaskRequest::parse(br#"{"title":"x","status":"DONE"}"#, user_id),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn test_update_parses_partial_body() {
        let data = UpdateTaskRequest::parse(br#"{"status":"COMPLETED","dueDate":"2025-03-15"}"#).unwrap();

        assert_eq!(data.status, Some(TaskStatus::Completed));
        assert_eq!(data.title, None);
        assert_eq!(
            data.due_date.map(|d| d.to_rfc3339()),
            Some("2025-03-15T00:00:00+00:00".to_string())
        );
    }
}
