//! Discord bot client setup and lifecycle management.
//!
//! This module provides the RolecallBot struct which manages the Discord client
//! connection and its graceful shutdown.

use crate::dispatcher::DispatchSettings;
use crate::handler::RolecallHandler;
use rolecall_error::{PlatformError, PlatformErrorKind, RolecallResult};
use rolecall_interface::GuildRoleStore;
use serenity::Client;
use serenity::model::id::ApplicationId;
use std::num::NonZeroU64;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Main Discord bot client for Rolecall.
///
/// # Example
/// ```no_run
/// use rolecall_discord::{DispatchSettings, RolecallBot};
/// use rolecall_interface::GuildRoleStore;
/// use std::num::NonZeroU64;
/// use std::sync::Arc;
///
/// # async fn example(store: Arc<dyn GuildRoleStore>) -> Result<(), Box<dyn std::error::Error>> {
/// let token = std::env::var("DISCORD_TOKEN")?;
/// let application_id: NonZeroU64 = std::env::var("DISCORD_APPLICATION_ID")?.parse()?;
///
/// let settings = DispatchSettings::default();
/// let mut bot = RolecallBot::new(&token, application_id, store, settings).await?;
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct RolecallBot {
    client: Client,
}

impl RolecallBot {
    /// Create a new RolecallBot instance.
    ///
    /// # Errors
    /// Returns an error if the Serenity client fails to initialize.
    #[instrument(skip(token, store, settings), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        application_id: NonZeroU64,
        store: Arc<dyn GuildRoleStore>,
        settings: DispatchSettings,
    ) -> RolecallResult<Self> {
        info!("Initializing Rolecall Discord bot");

        let handler = RolecallHandler::new(store, settings);
        let intents = RolecallHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents)
            .application_id(ApplicationId::new(application_id.get()))
            .event_handler(handler)
            .await
            .map_err(|e| {
                PlatformError::new(PlatformErrorKind::Connection(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Start the Discord bot.
    ///
    /// Blocks until the bot is shut down. Ctrl+C closes every shard, after
    /// which this returns.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> RolecallResult<()> {
        info!("Starting Discord bot");

        let shard_manager = self.client.shard_manager.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown requested, closing shards");
                    shard_manager.shutdown_all().await;
                }
                Err(e) => warn!(error = %e, "Could not listen for shutdown signal"),
            }
        });

        self.client.start().await.map_err(|e| {
            PlatformError::new(PlatformErrorKind::Connection(format!(
                "Client error: {}",
                e
            )))
        })?;

        info!("Discord bot stopped");
        Ok(())
    }
}
