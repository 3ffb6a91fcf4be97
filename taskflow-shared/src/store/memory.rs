/// In-memory stores for tests and local development
///
/// Both stores are cheap to clone; clones share the same underlying rows, so
/// a test can keep a handle and inspect what the server wrote.

use super::{ActivityStore, StoreResult, TaskStore};
use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user_activity::{NewUserActivity, UserActivity},
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Task store backed by a vector
#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts fully-formed tasks as-is (ids and timestamps included)
    pub async fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.write().await.extend(tasks);
    }

    /// Snapshot of every stored task, in insertion order
    pub async fn all(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, data: CreateTask) -> StoreResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let mut owned: Vec<Task> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn update(&self, id: Uuid, user_id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;

        Ok(tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .map(|task| {
                data.apply(task);
                task.clone()
            }))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;

        Ok(tasks
            .iter()
            .position(|t| t.id == id && t.user_id == user_id)
            .map(|index| tasks.remove(index)))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Activity store backed by a vector
#[derive(Clone, Default)]
pub struct MemoryActivityStore {
    rows: Arc<RwLock<Vec<UserActivity>>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every appended row, oldest first
    pub async fn all(&self) -> Vec<UserActivity> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn append(&self, activity: NewUserActivity) -> StoreResult<UserActivity> {
        let row = activity.into_activity(Uuid::new_v4());
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<UserActivity>> {
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
