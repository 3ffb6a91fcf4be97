/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskflow_api::{app::{build_router, AppState}, config::Config};
/// use taskflow_shared::activity::ActivityLogger;
/// use taskflow_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskflow_shared::store::postgres::{PgActivityStore, PgTaskStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig::new(config.database.url.clone())).await?;
///
/// let activities = Arc::new(PgActivityStore::new(pool.clone()));
/// let (logger, _worker) = ActivityLogger::spawn(activities.clone(), config.activity.queue_capacity);
///
/// let state = AppState::new(Arc::new(PgTaskStore::new(pool)), activities, logger, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use taskflow_shared::activity::ActivityLogger;
use taskflow_shared::auth::context::AuthContext;
use taskflow_shared::store::{ActivityStore, TaskStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Task storage
    pub tasks: Arc<dyn TaskStore>,

    /// Activity rows, read side
    pub activities: Arc<dyn ActivityStore>,

    /// Activity logger, write side
    pub activity: ActivityLogger,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        activities: Arc<dyn ActivityStore>,
        activity: ActivityLogger,
        config: Config,
    ) -> Self {
        Self {
            tasks,
            activities,
            activity,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /tasks                    # HTML task board (authenticated)
/// └── /api/                     # JSON API (authenticated)
///     ├── /tasks
///     │   ├── POST   /          # Create task
///     │   ├── GET    /          # List tasks
///     │   ├── PATCH  /:id       # Update task
///     │   └── DELETE /:id       # Delete task
///     └── GET /activity         # Recent activity
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Authentication (protected routes only, before any body is read)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let protected_routes = Router::new()
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/:id",
            patch(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route("/api/activity", get(routes::activity::list_activity))
        .route("/tasks", get(routes::board::task_board))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.allows_any_origin() {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token and injects [`AuthContext`] into request
/// extensions. Any failure is a 401 and the handler never runs.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = AuthContext::from_headers(req.headers(), state.jwt_secret()).map_err(|err| {
        debug!(error = %err, path = %req.uri().path(), "Rejected unauthenticated request");
        ApiError::from(err)
    })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
