//! Serenity-backed implementations of the platform ports.

use crate::conversions::create_commands;
use async_trait::async_trait;
use rolecall_core::{CommandSpec, GuildRole};
use rolecall_error::{PlatformError, PlatformErrorKind, RolecallResult};
use rolecall_interface::{CommandRegistry, RoleDirectory};
use serenity::http::{Http, HttpError};
use serenity::model::id::{GuildId, RoleId, UserId};
use std::sync::Arc;
use tracing::{debug, instrument};

const GRANT_REASON: &str = "Self-assigned with /role add";
const REVOKE_REASON: &str = "Self-removed with /role remove";

/// Role directory and command registry over Serenity's HTTP client.
///
/// # Example
///
/// ```rust,ignore
/// let platform = SerenityPlatform::new(ctx.http.clone());
/// let roles = platform.list_guild_roles("1234567890").await?;
/// ```
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    /// Wrap a shared HTTP client, coordinating rate limits with the gateway client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Parse a snowflake. Zero is rejected because Serenity's id types cannot hold it.
fn parse_snowflake(kind: &str, raw: &str) -> Result<u64, PlatformError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::InvalidId(format!("{} id '{}'", kind, raw)))
        })
}

fn guild_id(raw: &str) -> Result<GuildId, PlatformError> {
    parse_snowflake("guild", raw).map(GuildId::new)
}

fn user_id(raw: &str) -> Result<UserId, PlatformError> {
    parse_snowflake("user", raw).map(UserId::new)
}

fn role_id(raw: &str) -> Result<RoleId, PlatformError> {
    parse_snowflake("role", raw).map(RoleId::new)
}

/// Map a Serenity failure, singling out missing bot permissions.
fn platform_error(action: &str, err: serenity::Error) -> PlatformError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        if response.status_code.as_u16() == 403 {
            return PlatformError::new(PlatformErrorKind::InsufficientPermissions(format!(
                "{}: {}",
                action, response.error.message
            )));
        }
    }
    PlatformError::new(PlatformErrorKind::Api(format!("{}: {}", action, err)))
}

#[async_trait]
impl RoleDirectory for SerenityPlatform {
    #[instrument(skip(self))]
    async fn list_guild_roles(&self, guild: &str) -> RolecallResult<Vec<GuildRole>> {
        let guild = guild_id(guild)?;
        let roles = self
            .http
            .get_guild_roles(guild)
            .await
            .map_err(|e| platform_error("list guild roles", e))?;

        debug!(role_count = roles.len(), "Fetched guild roles");

        Ok(roles
            .into_iter()
            .map(|role| GuildRole {
                id: role.id.to_string(),
                is_everyone: role.id.get() == guild.get(),
                name: role.name,
                managed: role.managed,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn grant_role(&self, guild: &str, user: &str, role: &str) -> RolecallResult<()> {
        self.http
            .add_member_role(guild_id(guild)?, user_id(user)?, role_id(role)?, Some(GRANT_REASON))
            .await
            .map_err(|e| platform_error("add member role", e))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_role(&self, guild: &str, user: &str, role: &str) -> RolecallResult<()> {
        self.http
            .remove_member_role(
                guild_id(guild)?,
                user_id(user)?,
                role_id(role)?,
                Some(REVOKE_REASON),
            )
            .await
            .map_err(|e| platform_error("remove member role", e))?;
        Ok(())
    }
}

#[async_trait]
impl CommandRegistry for SerenityPlatform {
    #[instrument(skip(self, schema), fields(command_count = schema.len()))]
    async fn put_guild_commands(&self, guild: &str, schema: &[CommandSpec]) -> RolecallResult<()> {
        let registered = guild_id(guild)?
            .set_commands(&self.http, create_commands(schema))
            .await
            .map_err(|e| platform_error("set guild commands", e))?;

        debug!(registered = registered.len(), "Guild commands replaced");
        Ok(())
    }
}
