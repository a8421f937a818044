//! Per-guild command registration and guild onboarding.

use futures::future::join_all;
use rolecall_core::command_schema;
use rolecall_error::RolecallError;
use rolecall_interface::{CommandRegistry, GuildRoleStore};
use tracing::{error, info, instrument};

/// Outcome of pushing the command schema to a set of guilds.
#[derive(Debug, Default)]
pub struct RegistrationReport {
    /// Guilds whose command set was replaced
    pub registered: Vec<String>,
    /// Guilds whose registration failed, with the cause
    pub failed: Vec<(String, RolecallError)>,
}

impl RegistrationReport {
    /// Whether every guild registered.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replace the command set of every guild in `guild_ids`.
///
/// Guilds are registered concurrently and independently: a failing guild is
/// logged and reported without affecting the others.
#[instrument(skip(registry, guild_ids), fields(guild_count = guild_ids.len()))]
pub async fn register_guild_commands(
    registry: &dyn CommandRegistry,
    guild_ids: &[String],
) -> RegistrationReport {
    let schema = command_schema();

    let attempts = guild_ids.iter().map(|guild_id| {
        let schema = &schema;
        async move {
            info!(guild_id = %guild_id, "Started refreshing guild commands");
            let result = registry.put_guild_commands(guild_id, schema).await;
            match &result {
                Ok(()) => info!(guild_id = %guild_id, "Registered guild commands"),
                Err(e) => {
                    error!(guild_id = %guild_id, error = %e, "Error registering guild commands")
                }
            }
            (guild_id.clone(), result)
        }
    });

    let mut report = RegistrationReport::default();
    for (guild_id, result) in join_all(attempts).await {
        match result {
            Ok(()) => report.registered.push(guild_id),
            Err(e) => report.failed.push((guild_id, e)),
        }
    }

    info!(
        registered = report.registered.len(),
        failed = report.failed.len(),
        "Guild command registration finished"
    );
    report
}

/// Make sure every guild in `guild_ids` has a stored role configuration.
///
/// Failures are logged per guild and returned; they never stop the others.
#[instrument(skip(store, guild_ids), fields(guild_count = guild_ids.len()))]
pub async fn ensure_guilds(
    store: &dyn GuildRoleStore,
    guild_ids: &[String],
) -> Vec<(String, RolecallError)> {
    let attempts = guild_ids.iter().map(|guild_id| async move {
        (guild_id.clone(), store.ensure_guild(guild_id).await)
    });

    join_all(attempts)
        .await
        .into_iter()
        .filter_map(|(guild_id, result)| match result {
            Ok(()) => None,
            Err(e) => {
                error!(guild_id = %guild_id, error = %e, "Failed to ensure guild config");
                Some((guild_id, e))
            }
        })
        .collect()
}
