/// Database models for Taskflow
///
/// This module contains the persisted entities and their PostgreSQL operations.
///
/// # Models
///
/// - `task`: User-owned tasks with status and priority
/// - `user_activity`: Append-only log of user-triggered actions
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
/// use taskflow_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: Uuid::new_v4(),
///     title: "Buy milk".to_string(),
///     description: None,
///     status: TaskStatus::Pending,
///     priority: TaskPriority::Low,
///     due_date: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user_activity;
