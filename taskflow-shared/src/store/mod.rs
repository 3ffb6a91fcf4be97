/// Storage abstraction for tasks and activity rows
///
/// Handlers and the activity logger talk to storage through the
/// [`TaskStore`] and [`ActivityStore`] traits so the same code runs against
/// PostgreSQL in production and against in-memory collections in tests.
///
/// # Backends
///
/// - [`postgres`]: `sqlx` over a `PgPool`, delegating to the model methods
/// - [`memory`]: `tokio::sync::RwLock` over plain vectors
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskflow_shared::store::{memory::MemoryTaskStore, TaskStore};
///
/// let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
/// ```

pub mod memory;
pub mod postgres;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user_activity::{NewUserActivity, UserActivity},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend cannot serve requests right now
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted task collection, always scoped by owning user
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task, generating its id and timestamps
    async fn create(&self, data: CreateTask) -> StoreResult<Task>;

    /// Lists a user's tasks ordered by `created_at` descending
    ///
    /// Tasks with identical creation times have no guaranteed relative order.
    async fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Finds one of the user's tasks
    async fn find(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>>;

    /// Updates one of the user's tasks, returning the new row
    async fn update(&self, id: Uuid, user_id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>>;

    /// Deletes one of the user's tasks, returning the removed row
    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>>;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// Append-only activity log storage
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Appends one row
    async fn append(&self, activity: NewUserActivity) -> StoreResult<UserActivity>;

    /// Lists a user's most recent rows, newest first
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<UserActivity>>;
}
