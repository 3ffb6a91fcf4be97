/// Task item component
///
/// Presents a single task and turns a status selection into two effects, in
/// this order:
///
/// 1. The caller's `on_status_change(id, new_status)` callback runs,
///    synchronously and exactly once. Updating state is the caller's job.
/// 2. If the viewer has a session user id, a `STATUS_CHANGE` activity is
///    submitted. Without one, logging is skipped with an error; the status
///    change itself has already gone through.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskflow_shared::activity::ActivityLogger;
/// use taskflow_shared::auth::context::AuthContext;
/// use taskflow_shared::models::task::{Task, TaskStatus};
/// use taskflow_shared::store::memory::MemoryActivityStore;
/// use taskflow_shared::ui::task_item::TaskItem;
///
/// # #[tokio::main]
/// # async fn main() {
/// # let task: Task = serde_json::from_value(serde_json::json!({
/// #     "id": "6f1c2a0e-1d47-4c44-9a51-5f7b0f0e3a11", "title": "Ship it",
/// #     "description": null, "status": "PENDING", "priority": "HIGH",
/// #     "dueDate": null, "userId": "0b4c7e22-6d3f-4f5e-8a64-2f0a9c1d7e55",
/// #     "createdAt": "2025-03-01T00:00:00Z", "updatedAt": "2025-03-01T00:00:00Z"
/// # })).unwrap();
/// let (logger, _worker) = ActivityLogger::spawn(Arc::new(MemoryActivityStore::new()), 16);
/// let session = AuthContext::new(task.user_id);
///
/// let item = TaskItem::new(&task, Some(&session));
/// assert_eq!(item.view().priority_class, "bg-red-100 text-red-800");
///
/// item.change_status(TaskStatus::Completed, |id, status| {
///     println!("{id} -> {status}");
/// }, &logger);
/// # }
/// ```

use super::RenderError;
use crate::activity::{ActivityEntry, ActivityEvent, ActivityLogger, StatusChanged};
use crate::auth::context::AuthContext;
use crate::models::task::{Task, TaskPriority, TaskStatus};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;
use uuid::Uuid;

const TEMPLATE: &str = include_str!("../../templates/task_item.html.tera");

/// Style classes for each priority
pub fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "bg-red-100 text-red-800",
        TaskPriority::Medium => "bg-yellow-100 text-yellow-800",
        TaskPriority::Low => "bg-green-100 text-green-800",
    }
}

/// One entry of the status selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the template needs, already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: &'static str,
    pub priority_class: &'static str,
    pub has_due_date: bool,
    pub due_label: String,
    pub status_options: Vec<StatusOption>,
}

/// A task as seen by one viewer
pub struct TaskItem<'a> {
    task: &'a Task,
    session: Option<&'a AuthContext>,
}

impl<'a> TaskItem<'a> {
    pub fn new(task: &'a Task, session: Option<&'a AuthContext>) -> Self {
        Self { task, session }
    }

    /// Builds the view model
    ///
    /// Due dates are shown as an en-US locale date (`3/15/2025`).
    pub fn view(&self) -> TaskItemView {
        let task = self.task;
        let due_label = task
            .due_date
            .map(|due| due.format("%-m/%-d/%Y").to_string())
            .unwrap_or_default();

        TaskItemView {
            id: task.id.to_string(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.as_str(),
            priority_class: priority_class(task.priority),
            has_due_date: task.due_date.is_some(),
            due_label,
            status_options: TaskStatus::ALL
                .iter()
                .map(|status| StatusOption {
                    value: status.as_str(),
                    label: status.label(),
                    selected: *status == task.status,
                })
                .collect(),
        }
    }

    /// Renders the component to an HTML fragment
    ///
    /// All task text is HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render
    pub fn render(&self) -> Result<String, RenderError> {
        let context = Context::from_serialize(self.view())?;
        Ok(Tera::one_off(TEMPLATE, &context, true)?)
    }

    /// Handles a status selection
    ///
    /// The callback always runs first and exactly once. Activity logging
    /// afterwards is best-effort and depends on a session user being present.
    pub fn change_status<F>(&self, new_status: TaskStatus, on_status_change: F, logger: &ActivityLogger)
    where
        F: FnOnce(Uuid, TaskStatus),
    {
        on_status_change(self.task.id, new_status);

        let Some(session) = self.session else {
            error!(
                task_id = %self.task.id,
                "No session user found. Unable to log activity."
            );
            return;
        };

        logger.log(ActivityEntry::new(
            session.user_id,
            ActivityEvent::StatusChange(StatusChanged {
                task_id: self.task.id,
                old_status: self.task.status,
                new_status,
            }),
        ));
    }
}
