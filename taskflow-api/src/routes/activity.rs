/// Activity history endpoint
///
/// Read-only view of the caller's own activity rows. Reading the history
/// is not itself recorded.
///
/// # Endpoint
///
/// ```text
/// GET /api/activity?limit=20
/// Authorization: Bearer <jwt_token>
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use taskflow_shared::{auth::context::AuthContext, models::user_activity::UserActivity};

/// Rows returned when no limit is given
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest accepted limit; bigger values are clamped
pub const MAX_LIMIT: i64 = 200;

/// Query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

impl ActivityQuery {
    /// Requested limit clamped to `1..=MAX_LIMIT`
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// List recent activity, newest first
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `500 Internal Server Error`: `"Error fetching activity"`
pub async fn list_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<UserActivity>>> {
    let rows = state
        .activities
        .list_recent(auth.user_id, query.effective_limit())
        .await
        .map_err(|e| ApiError::internal("Error fetching activity", e))?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        assert_eq!(ActivityQuery::default().effective_limit(), 50);
        assert_eq!(ActivityQuery { limit: Some(10) }.effective_limit(), 10);
        assert_eq!(ActivityQuery { limit: Some(5000) }.effective_limit(), 200);
        assert_eq!(ActivityQuery { limit: Some(0) }.effective_limit(), 1);
    }
}
