/// Typed activity events
///
/// Every action kind has its own payload struct, so call sites cannot
/// attach the wrong metadata to an action. [`ActivityEvent::metadata`]
/// flattens the payload into the JSON object stored in the `metadata`
/// column.

use crate::models::{
    task::{TaskPriority, TaskStatus},
    user_activity::ActivityKind,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// A task was created
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreated {
    pub task_id: Uuid,
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// A user's task list was fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksFetched {
    pub total_tasks_fetched: usize,
}

/// Task fields were edited
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdated {
    pub task_id: Uuid,
    pub changed_fields: Vec<String>,
}

/// A task was removed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDeleted {
    pub task_id: Uuid,
    pub title: String,
}

/// A task moved to another status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub task_id: Uuid,
    pub old_status: TaskStatus,
    pub new_status: TaskStatus,
}

/// A task's priority changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityChanged {
    pub task_id: Uuid,
    pub old_priority: TaskPriority,
    pub new_priority: TaskPriority,
}

/// An activity worth recording, keyed by action kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityEvent {
    Login,
    Signup,
    TaskCreate(TaskCreated),
    TaskFetch(TasksFetched),
    TaskUpdate(TaskUpdated),
    TaskDelete(TaskDeleted),
    StatusChange(StatusChanged),
    PriorityChange(PriorityChanged),
    PasswordChange,
}

impl ActivityEvent {
    /// The action kind stored alongside the metadata
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityEvent::Login => ActivityKind::Login,
            ActivityEvent::Signup => ActivityKind::Signup,
            ActivityEvent::TaskCreate(_) => ActivityKind::TaskCreate,
            ActivityEvent::TaskFetch(_) => ActivityKind::TaskFetch,
            ActivityEvent::TaskUpdate(_) => ActivityKind::TaskUpdate,
            ActivityEvent::TaskDelete(_) => ActivityKind::TaskDelete,
            ActivityEvent::StatusChange(_) => ActivityKind::StatusChange,
            ActivityEvent::PriorityChange(_) => ActivityKind::PriorityChange,
            ActivityEvent::PasswordChange => ActivityKind::PasswordChange,
        }
    }

    /// Renders the payload as a JSON object stamped with `timestamp`
    ///
    /// The timestamp uses the ISO-8601 form with millisecond precision and a
    /// `Z` suffix, e.g. `2025-03-15T10:30:00.000Z`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use taskflow_shared::activity::{ActivityEvent, TasksFetched};
    ///
    /// let at = Utc.with_ymd_and_hms(2025, 3, 15, 10, 30, 0).unwrap();
    /// let metadata = ActivityEvent::TaskFetch(TasksFetched { total_tasks_fetched: 3 }).metadata(at);
    ///
    /// assert_eq!(metadata["totalTasksFetched"], 3);
    /// assert_eq!(metadata["timestamp"], "2025-03-15T10:30:00.000Z");
    /// ```
    pub fn metadata(&self, at: DateTime<Utc>) -> JsonValue {
        let mut fields = match serde_json::to_value(self) {
            Ok(JsonValue::Object(map)) => map,
            _ => Map::new(),
        };

        fields.remove("action");
        fields.insert(
            "timestamp".to_string(),
            JsonValue::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        JsonValue::Object(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_task_create_metadata() {
        let task_id = Uuid::new_v4();
        let event = ActivityEvent::TaskCreate(TaskCreated {
            task_id,
            title: "Buy milk".to_string(),
            due_date: None,
        });

        assert_eq!(event.kind(), ActivityKind::TaskCreate);
        assert_eq!(
            event.metadata(at()),
            json!({
                "taskId": task_id,
                "title": "Buy milk",
                "dueDate": null,
                "timestamp": "2025-01-02T03:04:05.000Z",
            })
        );
    }

    #[test]
    fn test_status_change_metadata() {
        let task_id = Uuid::new_v4();
        let event = ActivityEvent::StatusChange(StatusChanged {
            task_id,
            old_status: TaskStatus::Pending,
            new_status: TaskStatus::Completed,
        });

        let metadata = event.metadata(at());
        assert_eq!(metadata["oldStatus"], "PENDING");
        assert_eq!(metadata["newStatus"], "COMPLETED");
        assert_eq!(metadata["taskId"], task_id.to_string());
        assert!(metadata.get("action").is_none());
    }

    #[test]
    fn test_unit_events_only_carry_timestamp() {
        for event in [
            ActivityEvent::Login,
            ActivityEvent::Signup,
            ActivityEvent::PasswordChange,
        ] {
            assert_eq!(
                event.metadata(at()),
                json!({ "timestamp": "2025-01-02T03:04:05.000Z" })
            );
        }
    }

    #[test]
    fn test_kind_mapping() {
        let task_id = Uuid::new_v4();
        assert_eq!(
            ActivityEvent::TaskUpdate(TaskUpdated {
                task_id,
                changed_fields: vec!["title".to_string()],
            })
            .kind(),
            ActivityKind::TaskUpdate
        );
        assert_eq!(
            ActivityEvent::PriorityChange(PriorityChanged {
                task_id,
                old_priority: TaskPriority::Low,
                new_priority: TaskPriority::High,
            })
            .kind(),
            ActivityKind::PriorityChange
        );
        assert_eq!(
            ActivityEvent::TaskDelete(TaskDeleted {
                task_id,
                title: "x".to_string(),
            })
            .kind(),
            ActivityKind::TaskDelete
        );
    }
}
