//! Database connection utilities.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use rolecall_error::{ConfigError, RolecallResult};
use std::time::Duration;
use tracing::{info, instrument};

/// Shared PostgreSQL connection pool.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pool and per-call limits for the role store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Maximum pooled connections
    pub pool_size: u32,
    /// Upper bound on a single store call, including pool checkout
    pub timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            pool_size: 8,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Build the process-wide connection pool.
///
/// Connections are opened on demand, so a database that is down at startup
/// surfaces as unavailable-store errors on individual calls.
///
/// # Errors
///
/// Returns a configuration error if `pool_size` is zero.
#[instrument(skip(database_url), fields(pool_size = settings.pool_size))]
pub fn establish_pool(database_url: &str, settings: &StoreSettings) -> RolecallResult<PgPool> {
    if settings.pool_size == 0 {
        return Err(ConfigError::new("store pool size must be at least 1").into());
    }

    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(settings.timeout)
        .build_unchecked(manager);

    info!("Connection pool ready");
    Ok(pool)
}
