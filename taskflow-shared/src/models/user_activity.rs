/// User activity model and database operations
///
/// Each row records one user-triggered action. The table is an append-only
/// audit trail: this crate only ever inserts and reads rows, it never
/// updates or deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_activities (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     action activity_kind NOT NULL,
///     metadata JSONB NOT NULL DEFAULT '{}',
///     ip_address TEXT NOT NULL,
///     user_agent TEXT NOT NULL,
///     logged_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Kind of action recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Login,
    Signup,
    TaskCreate,
    TaskFetch,
    TaskUpdate,
    TaskDelete,
    StatusChange,
    PriorityChange,
    PasswordChange,
}

impl ActivityKind {
    /// Converts kind to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Login => "LOGIN",
            ActivityKind::Signup => "SIGNUP",
            ActivityKind::TaskCreate => "TASK_CREATE",
            ActivityKind::TaskFetch => "TASK_FETCH",
            ActivityKind::TaskUpdate => "TASK_UPDATE",
            ActivityKind::TaskDelete => "TASK_DELETE",
            ActivityKind::StatusChange => "STATUS_CHANGE",
            ActivityKind::PriorityChange => "PRIORITY_CHANGE",
            ActivityKind::PasswordChange => "PASSWORD_CHANGE",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded activity row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    /// Row ID
    pub id: Uuid,

    /// Acting user
    pub user_id: Uuid,

    /// What the user did
    pub action: ActivityKind,

    /// Action-specific details, always including `timestamp`
    pub metadata: JsonValue,

    /// Client IP address or a sentinel when unavailable
    pub ip_address: String,

    /// Client user agent or a sentinel when unavailable
    pub user_agent: String,

    /// When the activity was logged
    #[serde(rename = "timestamp")]
    pub logged_at: DateTime<Utc>,
}

/// Input for appending an activity row
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserActivity {
    pub user_id: Uuid,
    pub action: ActivityKind,
    pub metadata: JsonValue,
    pub ip_address: String,
    pub user_agent: String,
    pub logged_at: DateTime<Utc>,
}

impl NewUserActivity {
    /// Materializes the row as it will be stored under `id`
    pub fn into_activity(self, id: Uuid) -> UserActivity {
        UserActivity {
            id,
            user_id: self.user_id,
            action: self.action,
            metadata: self.metadata,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            logged_at: self.logged_at,
        }
    }
}

impl UserActivity {
    /// Appends one activity row
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn append(pool: &PgPool, data: NewUserActivity) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UserActivity>(
            r#"
            INSERT INTO user_activities (user_id, action, metadata, ip_address, user_agent, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, action, metadata, ip_address, user_agent, logged_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.action)
        .bind(data.metadata)
        .bind(data.ip_address)
        .bind(data.user_agent)
        .bind(data.logged_at)
        .fetch_one(pool)
        .await
    }

    /// Lists a user's most recent activity, newest first
    pub async fn list_recent_by_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserActivity>(
            r#"
            SELECT id, user_id, action, metadata, ip_address, user_agent, logged_at
            FROM user_activities
            WHERE user_id = $1
            ORDER BY logged_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
