//! # Taskflow API Server
//!
//! Task management API: authenticated users create, list, update and
//! delete tasks, and every action lands in an append-only activity log.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskflow \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskflow-api
//! ```

use std::sync::Arc;
use std::time::Duration;

use taskflow_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use taskflow_shared::{
    activity::ActivityLogger,
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::postgres::{PgActivityStore, PgTaskStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long shutdown waits for queued activity rows
const ACTIVITY_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!(
        "Taskflow API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = create_pool(DatabaseConfig {
        max_connections: config.database.max_connections,
        ..DatabaseConfig::new(config.database.url.clone())
    })
    .await?;

    run_migrations(&pool).await?;

    let activities = Arc::new(PgActivityStore::new(pool.clone()));
    let (logger, worker) = ActivityLogger::spawn(activities.clone(), config.activity.queue_capacity);

    let bind_address = config.bind_address();
    let state = AppState::new(
        Arc::new(PgTaskStore::new(pool.clone())),
        activities,
        logger,
        config,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Flushing activity log...");
    if tokio::time::timeout(ACTIVITY_FLUSH_TIMEOUT, worker.join())
        .await
        .is_err()
    {
        tracing::warn!("Activity log did not drain in time, pending entries dropped");
    }

    close_pool(pool).await;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "taskflow_api=debug,taskflow_shared=debug,tower_http=debug".into()
    });

    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
