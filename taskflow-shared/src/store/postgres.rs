/// PostgreSQL-backed stores
///
/// Thin adapters from the storage traits onto the `sqlx` model methods.

use super::{ActivityStore, StoreResult, TaskStore};
use crate::db::pool::health_check;
use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user_activity::{NewUserActivity, UserActivity},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Task store over a PostgreSQL pool
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_user(&self.pool, user_id).await?)
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id_and_user(&self.pool, id, user_id).await?)
    }

    async fn update(&self, id: Uuid, user_id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        Ok(Task::update(&self.pool, id, user_id, data).await?)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Task>> {
        Ok(Task::delete(&self.pool, id, user_id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

/// Activity store over a PostgreSQL pool
#[derive(Clone)]
pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn append(&self, activity: NewUserActivity) -> StoreResult<UserActivity> {
        Ok(UserActivity::append(&self.pool, activity).await?)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<UserActivity>> {
        Ok(UserActivity::list_recent_by_user(&self.pool, user_id, limit).await?)
    }
}
