//! PostgreSQL implementation of the guild role store.
//!
//! Add and remove are single statements, so two administrators editing the
//! same guild at once cannot lose each other's update: PostgreSQL row-locks the
//! config row for the duration of each statement and the affected-row count
//! tells us whether anything changed.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use rolecall_core::{AddOutcome, GuildRoleConfig, RemoveOutcome};
use rolecall_error::{RolecallResult, StoreError, StoreErrorKind};
use rolecall_interface::GuildRoleStore;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::connection::{PgPool, StoreSettings};
use crate::models::{GuildRoleConfigRow, NewGuildRoleConfig};
use crate::schema::guild_role_configs;
use crate::StoreResult;

/// Appends `$2` unless present, creating the row if the guild has none.
const ADD_AVAILABLE_ROLE: &str = "\
    INSERT INTO guild_role_configs (guild_id, available_roles) \
    VALUES ($1, ARRAY[$2]::TEXT[]) \
    ON CONFLICT (guild_id) DO UPDATE \
    SET available_roles = array_append(guild_role_configs.available_roles, $2), \
        updated_at = NOW() \
    WHERE NOT ($2 = ANY(guild_role_configs.available_roles))";

/// Removes every occurrence of `$2` and records it in the history.
const REMOVE_AVAILABLE_ROLE: &str = "\
    UPDATE guild_role_configs \
    SET available_roles = array_remove(available_roles, $2), \
        removed_roles = array_append(removed_roles, $2), \
        updated_at = NOW() \
    WHERE guild_id = $1 AND $2 = ANY(available_roles)";

/// Guild role store backed by a shared PostgreSQL pool.
///
/// Each call checks a connection out of the pool on the blocking thread pool,
/// returns it when the call finishes, and is bounded by the configured timeout.
/// Expiry is reported as an unavailable store. A statement that already reached
/// the server may still commit after its call timed out; each statement is
/// atomic, so it either fully applies or not at all.
///
/// # Example
/// ```no_run
/// use rolecall_database::{PostgresGuildRoleStore, StoreSettings, establish_pool};
/// use rolecall_interface::GuildRoleStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = StoreSettings::default();
/// let pool = establish_pool("postgres://localhost/rolecall", &settings)?;
/// let store = PostgresGuildRoleStore::new(pool, settings.timeout);
/// store.ensure_guild("1234").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresGuildRoleStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresGuildRoleStore {
    /// Create a store over `pool`, bounding every call by `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Create a store using the timeout from `settings`.
    pub fn with_settings(pool: PgPool, settings: &StoreSettings) -> Self {
        Self::new(pool, settings.timeout)
    }

    /// Run `f` with a pooled connection on the blocking pool, under the timeout.
    async fn with_connection<T, F>(&self, operation: &'static str, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        });

        let result = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(StoreError::new(StoreErrorKind::Unavailable(format!(
                "{} task failed: {}",
                operation, join_error
            )))),
            Err(_) => Err(StoreError::new(StoreErrorKind::Unavailable(format!(
                "{} timed out after {}ms",
                operation,
                self.timeout.as_millis()
            )))),
        };

        if let Err(e) = &result {
            error!(operation, error = %e, "Role store call failed");
        }
        result
    }
}

#[async_trait]
impl GuildRoleStore for PostgresGuildRoleStore {
    #[instrument(skip(self))]
    async fn ensure_guild(&self, guild_id: &str) -> RolecallResult<()> {
        let guild_id = guild_id.to_string();
        let inserted = self
            .with_connection("ensure_guild", move |conn| {
                diesel::insert_into(guild_role_configs::table)
                    .values(&NewGuildRoleConfig::empty(&guild_id))
                    .on_conflict(guild_role_configs::guild_id)
                    .do_nothing()
                    .execute(conn)
                    .map_err(StoreError::from)
            })
            .await?;

        debug!(created = inserted > 0, "Guild config ensured");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_config(&self, guild_id: &str) -> RolecallResult<GuildRoleConfig> {
        let owned_id = guild_id.to_string();
        let row = self
            .with_connection("get_config", move |conn| {
                guild_role_configs::table
                    .find(owned_id.as_str())
                    .select(GuildRoleConfigRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(StoreError::from)
            })
            .await?;

        Ok(row
            .map(GuildRoleConfig::from)
            .unwrap_or_else(|| GuildRoleConfig::empty(guild_id)))
    }

    #[instrument(skip(self))]
    async fn add_available_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> RolecallResult<AddOutcome> {
        let guild_id = guild_id.to_string();
        let role_id = role_id.to_string();
        let affected = self
            .with_connection("add_available_role", move |conn| {
                diesel::sql_query(ADD_AVAILABLE_ROLE)
                    .bind::<Text, _>(guild_id.as_str())
                    .bind::<Text, _>(role_id.as_str())
                    .execute(conn)
                    .map_err(StoreError::from)
            })
            .await?;

        let outcome = if affected > 0 {
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyPresent
        };
        debug!(%outcome, "Available role add finished");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn remove_available_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> RolecallResult<RemoveOutcome> {
        let guild_id = guild_id.to_string();
        let role_id = role_id.to_string();
        let affected = self
            .with_connection("remove_available_role", move |conn| {
                diesel::sql_query(REMOVE_AVAILABLE_ROLE)
                    .bind::<Text, _>(guild_id.as_str())
                    .bind::<Text, _>(role_id.as_str())
                    .execute(conn)
                    .map_err(StoreError::from)
            })
            .await?;

        let outcome = if affected > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotPresent
        };
        debug!(%outcome, "Available role remove finished");
        Ok(outcome)
    }
}
