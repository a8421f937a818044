//! Embedded schema migrations.

use crate::StoreResult;
use crate::connection::PgPool;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rolecall_error::{StoreError, StoreErrorKind};
use tracing::{info, instrument};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations on one connection.
///
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &mut PgConnection) -> StoreResult<usize> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|e| StoreError::new(StoreErrorKind::Migration(e.to_string())))
}

/// Run pending migrations using a pooled connection.
#[instrument(skip(pool))]
pub async fn migrate(pool: &PgPool) -> StoreResult<usize> {
    let pool = pool.clone();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)
    })
    .await
    .map_err(|e| StoreError::new(StoreErrorKind::Migration(e.to_string())))??;

    info!(applied, "Migrations complete");
    Ok(applied)
}
