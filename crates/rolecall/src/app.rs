//! Command implementations: bot lifecycle, migrations, inspection.

use crate::config::{DiscordCredentials, Settings};
use rolecall_core::GuildRoleConfig;
use rolecall_database::{PgPool, PostgresGuildRoleStore, establish_pool, migrate};
use rolecall_discord::RolecallBot;
use rolecall_error::RolecallResult;
use rolecall_interface::GuildRoleStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Build the pool and apply pending migrations.
async fn prepare_store(database_url: &str, settings: &Settings) -> RolecallResult<PgPool> {
    let pool = establish_pool(database_url, &settings.store_settings())?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Run the bot until Ctrl+C.
///
/// The store is ready before the gateway connects; the pool is dropped once
/// the client has shut down.
///
/// # Errors
///
/// Returns an error if migrations fail or the Discord client cannot start.
#[instrument(skip_all)]
pub async fn run_bot(
    credentials: &DiscordCredentials,
    database_url: &str,
    settings: &Settings,
) -> RolecallResult<()> {
    let pool = prepare_store(database_url, settings).await?;
    let store: Arc<dyn GuildRoleStore> = Arc::new(PostgresGuildRoleStore::with_settings(
        pool,
        &settings.store_settings(),
    ));

    let mut bot = RolecallBot::new(
        credentials.token(),
        *credentials.application_id(),
        store,
        settings.dispatch_settings(),
    )
    .await?;

    bot.start().await?;
    info!("Rolecall stopped");
    Ok(())
}

/// Apply pending migrations and return how many ran.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
#[instrument(skip_all)]
pub async fn run_migrate(database_url: &str, settings: &Settings) -> RolecallResult<usize> {
    let pool = establish_pool(database_url, &settings.store_settings())?;
    Ok(migrate(&pool).await?)
}

/// Fetch a guild's stored configuration.
///
/// A guild with no record yields an empty configuration.
///
/// # Errors
///
/// Returns an error if the store is unavailable.
#[instrument(skip(database_url, settings))]
pub async fn show_guild(
    database_url: &str,
    settings: &Settings,
    guild_id: &str,
) -> RolecallResult<GuildRoleConfig> {
    let pool = prepare_store(database_url, settings).await?;
    let store = PostgresGuildRoleStore::with_settings(pool, &settings.store_settings());
    store.get_config(guild_id).await
}
