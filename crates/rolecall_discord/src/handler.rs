//! Gateway event handler.

use crate::conversions::invocation_from_command;
use crate::dispatcher::{DispatchSettings, Dispatcher};
use crate::platform::SerenityPlatform;
use crate::registrar::{ensure_guilds, register_guild_commands};
use crate::responder::SerenityResponder;
use rolecall_interface::GuildRoleStore;
use serenity::all::{Context, EventHandler, GatewayIntents, Guild, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Serenity event handler wiring gateway events to the registrar and dispatcher.
pub struct RolecallHandler {
    store: Arc<dyn GuildRoleStore>,
    settings: DispatchSettings,
}

impl RolecallHandler {
    /// Create a handler over the shared role store.
    pub fn new(store: Arc<dyn GuildRoleStore>, settings: DispatchSettings) -> Self {
        if !settings.require_available {
            warn!(
                "Available-role list is not enforced: members may self-assign any unmanaged role"
            );
        }
        Self { store, settings }
    }

    /// Gateway intents the handler needs.
    ///
    /// Slash commands arrive regardless of intents; `GUILDS` supplies guild
    /// join events.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    /// Ensure stored configs and push the command schema for `guild_ids`.
    async fn onboard(&self, ctx: &Context, guild_ids: &[String]) {
        ensure_guilds(self.store.as_ref(), guild_ids).await;

        let platform = SerenityPlatform::new(ctx.http.clone());
        let report = register_guild_commands(&platform, guild_ids).await;
        if !report.is_complete() {
            warn!(
                failed = report.failed.len(),
                "Some guilds did not receive commands"
            );
        }
    }
}

#[async_trait]
impl EventHandler for RolecallHandler {
    #[instrument(skip_all, fields(bot = %ready.user.name, guild_count = ready.guilds.len()))]
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);

        let guild_ids: Vec<String> = ready.guilds.iter().map(|g| g.id.to_string()).collect();
        self.onboard(&ctx, &guild_ids).await;
    }

    #[instrument(skip_all, fields(guild_id = %guild.id))]
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new != Some(true) {
            return;
        }
        info!(name = %guild.name, "Joined guild");
        self.onboard(&ctx, &[guild.id.to_string()]).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let invocation = invocation_from_command(&command);
        let dispatcher = Dispatcher::new(
            self.store.clone(),
            Arc::new(SerenityPlatform::new(ctx.http.clone())),
            self.settings.clone(),
        );
        let responder = SerenityResponder::new(ctx.http.clone(), &command);
        dispatcher.respond(&invocation, &responder).await;
    }
}
