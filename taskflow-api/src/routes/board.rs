/// Task board page
///
/// `GET /tasks` renders the caller's tasks as HTML, one card per task.
/// Fetching the board counts as a task fetch and is logged as one.

use crate::{
    app::AppState,
    client::ClientInfo,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
    Extension,
};
use taskflow_shared::{
    activity::{ActivityEntry, ActivityEvent, TasksFetched},
    auth::context::AuthContext,
    ui::render_board,
};

const FETCH_FAILED: &str = "Error fetching tasks";

/// Task board
///
/// Renders the caller's tasks, newest first, as an HTML page.
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `500 Internal Server Error`: `"Error fetching tasks"`
pub async fn task_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    headers: HeaderMap,
) -> ApiResult<Html<String>> {
    let tasks = state
        .tasks
        .list_by_user(auth.user_id)
        .await
        .map_err(|e| ApiError::internal(FETCH_FAILED, e))?;

    let page = render_board(&tasks, Some(&auth)).map_err(|e| ApiError::internal(FETCH_FAILED, e))?;

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

    Ok(Html(page))
}
