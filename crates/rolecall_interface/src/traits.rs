//! Trait definitions for the role store and chat platform.

use async_trait::async_trait;
use rolecall_core::{AddOutcome, CommandSpec, GuildRole, GuildRoleConfig, RemoveOutcome, Reply};
use rolecall_error::RolecallResult;

/// Persisted per-guild self-assignable role configuration.
///
/// Implementations own the persisted state exclusively. A failure to reach the
/// backing store is reported as an unavailable store error and never as
/// "no change".
#[async_trait]
pub trait GuildRoleStore: Send + Sync {
    /// Create an empty configuration for `guild_id` unless one exists.
    ///
    /// Never overwrites existing data.
    async fn ensure_guild(&self, guild_id: &str) -> RolecallResult<()>;

    /// Current configuration, or an empty one (not persisted) if absent.
    async fn get_config(&self, guild_id: &str) -> RolecallResult<GuildRoleConfig>;

    /// Append `role_id` to the available list unless already present.
    async fn add_available_role(&self, guild_id: &str, role_id: &str)
    -> RolecallResult<AddOutcome>;

    /// Remove `role_id` from the available list by value, recording it in the
    /// removal history.
    async fn remove_available_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> RolecallResult<RemoveOutcome>;
}

/// Role listing and role mutation on the chat platform.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Every role defined in the guild.
    async fn list_guild_roles(&self, guild_id: &str) -> RolecallResult<Vec<GuildRole>>;

    /// Give `role_id` to `user_id`.
    async fn grant_role(&self, guild_id: &str, user_id: &str, role_id: &str)
    -> RolecallResult<()>;

    /// Take `role_id` from `user_id`.
    async fn revoke_role(&self, guild_id: &str, user_id: &str, role_id: &str)
    -> RolecallResult<()>;
}

/// Per-guild slash-command registration.
#[async_trait]
pub trait CommandRegistry: Send + Sync {
    /// Replace the guild's command set with `schema`.
    async fn put_guild_commands(&self, guild_id: &str, schema: &[CommandSpec])
    -> RolecallResult<()>;
}

/// Delivery of the single reply an invocation ends with.
///
/// The platform only accepts an initial response shortly after the
/// interaction arrives. Work that touches the store or the platform is
/// acknowledged with [`defer`](Self::defer) first and delivered later with
/// [`complete`](Self::complete); immediate replies use
/// [`respond`](Self::respond).
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Send `reply` as the initial response.
    async fn respond(&self, reply: &Reply) -> RolecallResult<()>;

    /// Acknowledge the interaction without content.
    async fn defer(&self) -> RolecallResult<()>;

    /// Deliver `reply` to an acknowledged interaction.
    async fn complete(&self, reply: &Reply) -> RolecallResult<()>;
}
