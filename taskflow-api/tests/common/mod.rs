//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - A router wired to in-memory stores
//! - Stores that always fail, for error paths
//! - JWT token generation
//! - Request and polling helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use taskflow_api::{
    app::{build_router, AppState},
    config::{ActivityConfig, ApiConfig, Config, DatabaseConfig, JwtConfig, LogFormat},
};
use taskflow_shared::{
    activity::{ActivityLogger, ActivityWorker},
    auth::jwt::{create_token, Claims},
    models::{
        task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask},
        user_activity::{NewUserActivity, UserActivity},
    },
    store::{
        memory::{MemoryActivityStore, MemoryTaskStore},
        ActivityStore, StoreError, StoreResult, TaskStore,
    },
};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub tasks: MemoryTaskStore,
    pub activities: MemoryActivityStore,
    pub worker: ActivityWorker,
    pub user_id: Uuid,
    pub jwt_token: String,
}

impl TestContext {
    /// Router over healthy in-memory stores
    pub fn new() -> Self {
        let tasks = MemoryTaskStore::new();
        let activities = MemoryActivityStore::new();
        Self::build(
            Arc::new(tasks.clone()),
            Arc::new(activities.clone()),
            tasks,
            activities,
        )
    }

    /// Task storage is down; activity storage works
    pub fn with_failing_tasks() -> Self {
        let activities = MemoryActivityStore::new();
        Self::build(
            Arc::new(FailingTaskStore),
            Arc::new(activities.clone()),
            MemoryTaskStore::new(),
            activities,
        )
    }

    /// Activity storage is down; task storage works
    pub fn with_failing_activity() -> Self {
        let tasks = MemoryTaskStore::new();
        Self::build(
            Arc::new(tasks.clone()),
            Arc::new(FailingActivityStore),
            tasks,
            MemoryActivityStore::new(),
        )
    }

    fn build(
        task_store: Arc<dyn TaskStore>,
        activity_store: Arc<dyn ActivityStore>,
        tasks: MemoryTaskStore,
        activities: MemoryActivityStore,
    ) -> Self {
        let config = test_config();
        let (logger, worker) =
            ActivityLogger::spawn(activity_store.clone(), config.activity.queue_capacity);

        let state = AppState::new(task_store, activity_store, logger, config);
        let app = build_router(state);

        let user_id = Uuid::new_v4();
        let jwt_token = token_for(user_id);

        Self {
            app,
            tasks,
            activities,
            worker,
            user_id,
            jwt_token,
        }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request authenticated as this context's user
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Bytes) {
        let auth = self.auth_header();
        self.send_raw(method, uri, Some(&auth), body.map(|b| b.to_string()), &[])
            .await
    }

    /// Sends a request with full control over auth, body and headers
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Bytes) {
        let mut request = Request::builder().method(method).uri(uri);

        if let Some(auth) = authorization {
            request = request.header(header::AUTHORIZATION, auth);
        }
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let request = request
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, body)
    }

    /// Shuts the router down and waits for every queued activity row
    ///
    /// Returns what reached the activity store.
    pub async fn flush(self) -> Vec<UserActivity> {
        let Self {
            app,
            activities,
            worker,
            ..
        } = self;

        drop(app);
        worker.join().await;

        activities.all().await
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
        activity: ActivityConfig { queue_capacity: 64 },
        log_format: LogFormat::Pretty,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    create_token(&Claims::new(user_id), JWT_SECRET).unwrap()
}

pub fn json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// A fully-formed task for seeding stores
pub fn task(user_id: Uuid, title: &str, created_at: DateTime<Utc>) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        due_date: None,
        user_id,
        created_at,
        updated_at: created_at,
    }
}

/// Helper to wait for condition with timeout
pub async fn wait_for<F, Fut>(condition: F, timeout_secs: u64) -> anyhow::Result<()>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout_secs);

    loop {
        if condition().await {
            return Ok(());
        }

        if start.elapsed() > timeout {
            anyhow::bail!("Condition not met within {} seconds", timeout_secs);
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}

fn outage() -> StoreError {
    StoreError::Unavailable("simulated outage".to_string())
}

/// Task store whose every call fails
pub struct FailingTaskStore;

#[async_trait]
impl TaskStore for FailingTaskStore {
    async fn create(&self, _data: CreateTask) -> StoreResult<Task> {
        Err(outage())
    }

    async fn list_by_user(&self, _user_id: Uuid) -> StoreResult<Vec<Task>> {
        Err(outage())
    }

    async fn find(&self, _id: Uuid, _user_id: Uuid) -> StoreResult<Option<Task>> {
        Err(outage())
    }

    async fn update(&self, _id: Uuid, _user_id: Uuid, _data: UpdateTask) -> StoreResult<Option<Task>> {
        Err(outage())
    }

    async fn delete(&self, _id: Uuid, _user_id: Uuid) -> StoreResult<Option<Task>> {
        Err(outage())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(outage())
    }
}

/// Activity store whose every call fails
pub struct FailingActivityStore;

#[async_trait]
impl ActivityStore for FailingActivityStore {
    async fn append(&self, _activity: NewUserActivity) -> StoreResult<UserActivity> {
        Err(outage())
    }

    async fn list_recent(&self, _user_id: Uuid, _limit: i64) -> StoreResult<Vec<UserActivity>> {
        Err(outage())
    }
}
