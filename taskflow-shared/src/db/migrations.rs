/// Database migration runner
///
/// Migrations live in the workspace-level `migrations/` directory and are
/// embedded into the binary at compile time, so a deployed server never
/// needs the SQL files on disk.
///
/// Each migration is a reversible pair:
/// - `{timestamp}_{name}.up.sql`
/// - `{timestamp}_{name}.down.sql`

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{info, warn};

/// Embedded migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Runs all pending migrations
///
/// Already-applied migrations are skipped. A failing migration aborts the run
/// and is returned as an error.
///
/// # Errors
///
/// Returns an error if a migration fails to apply or its checksum no longer
/// matches the recorded one.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        available = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .count(),
        "Starting database migrations"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}
