//! Slash-command dispatch.
//!
//! Each invocation is validated, executed, and turned into exactly one
//! [`Reply`]. Validation failures never reach the store or the platform.

use rolecall_core::{
    AddOutcome, DEFAULT_COLUMN_SIZE, GuildRole, Invocation, InvokingMember, MAX_COLUMNS_PER_PAGE,
    RemoveOutcome, Reply, RoleCommand, RoleRef, paginate, render_columns,
};
use rolecall_error::RolecallError;
use rolecall_interface::{GuildRoleStore, InteractionResponder, RoleDirectory};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

const LIST_TITLE: &str = "Available Roles";
const NO_ROLES: &str = "No roles available.";
const GUILD_ONLY: &str = "This command can only be used in a server.";
const MEMBERS_ONLY: &str = "This command is restricted to members only.";
const NOT_ADMINISTRATOR: &str = "You do not have permission to use this command.";
const UNKNOWN_COMMAND: &str = "Unknown command.";
const NOT_SELF_ASSIGNABLE: &str = "That role cannot be self-assigned.";
const NOT_CURATED: &str = "That role is not self-assignable in this server.";
const LIST_FAILED: &str = "Failed to list the roles.";
const UNACKNOWLEDGED: &str = "The command could not be acknowledged.";
const STORE_FAILED: &str =
    "Something went wrong while updating the available roles. Please try again later.";

/// Tunables for listing and self-assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Role names starting with this marker are hidden from listings
    pub reserved_prefix: String,
    /// Names per column in a listing
    pub column_size: usize,
    /// Restrict listing and self-assignment to the guild's available roles
    pub require_available: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            reserved_prefix: "@".to_string(),
            column_size: DEFAULT_COLUMN_SIZE,
            require_available: false,
        }
    }
}

/// A validated invocation, ready to execute.
#[derive(Debug)]
enum Action<'a> {
    ListRoles {
        guild_id: &'a str,
    },
    Grant {
        guild_id: &'a str,
        user_id: &'a str,
        role: &'a RoleRef,
    },
    Revoke {
        guild_id: &'a str,
        user_id: &'a str,
        role: &'a RoleRef,
    },
    MakeAvailable {
        guild_id: &'a str,
        role: &'a RoleRef,
    },
    MakeUnavailable {
        guild_id: &'a str,
        role: &'a RoleRef,
    },
}

/// Routes invocations to the role store or the role directory.
///
/// Holds no state between invocations.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(store, directory, DispatchSettings::default());
/// let reply = dispatcher.dispatch(&invocation).await;
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn GuildRoleStore>,
    directory: Arc<dyn RoleDirectory>,
    settings: DispatchSettings,
}

impl Dispatcher {
    /// Create a dispatcher over the given store and directory.
    pub fn new(
        store: Arc<dyn GuildRoleStore>,
        directory: Arc<dyn RoleDirectory>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            store,
            directory,
            settings,
        }
    }

    /// Handle one invocation.
    ///
    /// Infallible: store and platform failures become a failure reply.
    #[instrument(
        skip(self, invocation),
        fields(
            command = %invocation.command().label(),
            guild_id = ?invocation.guild_id(),
            user_id = %invocation.user_id(),
            status
        )
    )]
    pub async fn dispatch(&self, invocation: &Invocation) -> Reply {
        let reply = match self.validate(invocation) {
            Ok(action) => self.execute(action).await,
            Err(rejection) => {
                debug!(reason = ?rejection.text(), "Invocation rejected");
                rejection
            }
        };

        tracing::Span::current().record("status", tracing::field::display(reply.status));
        reply
    }

    /// Handle one invocation and deliver its reply through `responder`.
    ///
    /// Rejections are sent as the initial response. Anything that reaches the
    /// store or the platform is deferred first, so slow calls still end in a
    /// delivered reply. Delivery failures are logged.
    #[instrument(
        skip(self, invocation, responder),
        fields(
            command = %invocation.command().label(),
            guild_id = ?invocation.guild_id(),
            user_id = %invocation.user_id(),
            status
        )
    )]
    pub async fn respond(
        &self,
        invocation: &Invocation,
        responder: &dyn InteractionResponder,
    ) -> Reply {
        let reply = match self.validate(invocation) {
            Err(rejection) => {
                debug!(reason = ?rejection.text(), "Invocation rejected");
                if let Err(e) = responder.respond(&rejection).await {
                    error!(error = %e, "Failed to send rejection");
                }
                rejection
            }
            Ok(action) => match responder.defer().await {
                Ok(()) => {
                    let reply = self.execute(action).await;
                    if let Err(e) = responder.complete(&reply).await {
                        error!(error = %e, "Failed to deliver reply");
                    }
                    reply
                }
                Err(e) => {
                    // Without an acknowledgement nothing can reach the invoker.
                    error!(error = %e, "Failed to acknowledge invocation; not executing");
                    Reply::failed(UNACKNOWLEDGED)
                }
            },
        };

        tracing::Span::current().record("status", tracing::field::display(reply.status));
        reply
    }

    fn validate<'a>(&self, invocation: &'a Invocation) -> Result<Action<'a>, Reply> {
        let user_id = invocation.user_id().as_str();
        let command = invocation.command();

        if let RoleCommand::Unknown { .. } = command {
            return Err(Reply::rejected(UNKNOWN_COMMAND));
        }

        let guild_id = invocation
            .guild_id()
            .as_deref()
            .ok_or_else(|| Reply::rejected(GUILD_ONLY))?;

        match command {
            RoleCommand::RoleList => Ok(Action::ListRoles { guild_id }),
            RoleCommand::RoleAdd(role) => {
                let member = require_member(invocation.member())?;
                let role = require_role(role.as_ref(), "add")?;
                require_self_assignable(guild_id, role)?;
                if member.has_role(&role.id) {
                    return Err(Reply::rejected("You already have that role."));
                }
                Ok(Action::Grant {
                    guild_id,
                    user_id,
                    role,
                })
            }
            RoleCommand::RoleRemove(role) => {
                let member = require_member(invocation.member())?;
                let role = require_role(role.as_ref(), "remove")?;
                require_self_assignable(guild_id, role)?;
                if !member.has_role(&role.id) {
                    return Err(Reply::rejected("You don't have that role."));
                }
                Ok(Action::Revoke {
                    guild_id,
                    user_id,
                    role,
                })
            }
            RoleCommand::ConfigAdd(role) => {
                require_administrator(invocation.member())?;
                let role = require_role(role.as_ref(), "add")?;
                Ok(Action::MakeAvailable { guild_id, role })
            }
            RoleCommand::ConfigRemove(role) => {
                require_administrator(invocation.member())?;
                let role = require_role(role.as_ref(), "remove")?;
                Ok(Action::MakeUnavailable { guild_id, role })
            }
            RoleCommand::Unknown { .. } => Err(Reply::rejected(UNKNOWN_COMMAND)),
        }
    }

    async fn execute(&self, action: Action<'_>) -> Reply {
        match action {
            Action::ListRoles { guild_id } => self.list_roles(guild_id).await,
            Action::Grant {
                guild_id,
                user_id,
                role,
            } => {
                if let Err(reply) = self.require_curated(guild_id, role).await {
                    return reply;
                }
                match self.directory.grant_role(guild_id, user_id, &role.id).await {
                    Ok(()) => {
                        info!(role_id = %role.id, "Role granted");
                        Reply::completed(format!("Role {} has been added to you.", role.name))
                    }
                    Err(e) => {
                        error!(role_id = %role.id, error = %e, "Failed to add role");
                        Reply::failed("Failed to add the role.")
                    }
                }
            }
            Action::Revoke {
                guild_id,
                user_id,
                role,
            } => {
                if let Err(reply) = self.require_curated(guild_id, role).await {
                    return reply;
                }
                match self.directory.revoke_role(guild_id, user_id, &role.id).await {
                    Ok(()) => {
                        info!(role_id = %role.id, "Role revoked");
                        Reply::completed(format!("Role {} has been removed from you.", role.name))
                    }
                    Err(e) => {
                        error!(role_id = %role.id, error = %e, "Failed to remove role");
                        Reply::failed("Failed to remove the role.")
                    }
                }
            }
            Action::MakeAvailable { guild_id, role } => {
                match self.store.add_available_role(guild_id, &role.id).await {
                    Ok(AddOutcome::Added) => {
                        info!(role_id = %role.id, "Role made available");
                        Reply::completed(format!(
                            "Role {} has been added to the available roles.",
                            role.name
                        ))
                    }
                    Ok(AddOutcome::AlreadyPresent) => {
                        Reply::completed(format!("Role {} is already available.", role.name))
                    }
                    Err(e) => store_failure(&e),
                }
            }
            Action::MakeUnavailable { guild_id, role } => {
                match self.store.remove_available_role(guild_id, &role.id).await {
                    Ok(RemoveOutcome::Removed) => {
                        info!(role_id = %role.id, "Role made unavailable");
                        Reply::completed(format!(
                            "Role {} has been removed from the available roles.",
                            role.name
                        ))
                    }
                    Ok(RemoveOutcome::NotPresent) => Reply::completed(format!(
                        "Role {} is not in the available roles.",
                        role.name
                    )),
                    Err(e) => store_failure(&e),
                }
            }
        }
    }

    async fn list_roles(&self, guild_id: &str) -> Reply {
        let roles = match self.directory.list_guild_roles(guild_id).await {
            Ok(roles) => roles,
            Err(e) => {
                error!(error = %e, "Failed to list guild roles");
                return Reply::failed(LIST_FAILED);
            }
        };

        let mut roles: Vec<GuildRole> = roles
            .into_iter()
            .filter(|role| role.is_listable(&self.settings.reserved_prefix))
            .collect();

        if self.settings.require_available {
            let config = match self.store.get_config(guild_id).await {
                Ok(config) => config,
                Err(e) => return store_failure(&e),
            };
            roles.retain(|role| config.is_available(&role.id));
        }

        let names = sorted_names(roles);
        if names.is_empty() {
            return Reply::completed(NO_ROLES);
        }

        let columns = render_columns(&names, self.settings.column_size);
        Reply::columns(LIST_TITLE, paginate(columns, MAX_COLUMNS_PER_PAGE, LIST_TITLE))
    }

    /// When curation is enforced, reject roles missing from the available list.
    async fn require_curated(&self, guild_id: &str, role: &RoleRef) -> Result<(), Reply> {
        if !self.settings.require_available {
            return Ok(());
        }
        match self.store.get_config(guild_id).await {
            Ok(config) if config.is_available(&role.id) => Ok(()),
            Ok(_) => {
                debug!(role_id = %role.id, "Role not on the available list");
                Err(Reply::rejected(NOT_CURATED))
            }
            Err(e) => Err(store_failure(&e)),
        }
    }
}

/// Display names in case-insensitive alphabetical order.
fn sorted_names(roles: Vec<GuildRole>) -> Vec<String> {
    let mut names: Vec<String> = roles.into_iter().map(|role| role.name).collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    names
}

fn require_member(member: &Option<InvokingMember>) -> Result<&InvokingMember, Reply> {
    member.as_ref().ok_or_else(|| Reply::rejected(MEMBERS_ONLY))
}

fn require_administrator(member: &Option<InvokingMember>) -> Result<(), Reply> {
    if require_member(member)?.administrator {
        Ok(())
    } else {
        Err(Reply::rejected(NOT_ADMINISTRATOR))
    }
}

fn require_role<'a>(role: Option<&'a RoleRef>, verb: &str) -> Result<&'a RoleRef, Reply> {
    role.ok_or_else(|| Reply::rejected(format!("Please specify a valid role to {}.", verb)))
}

/// Managed roles and the everyone role (whose id is the guild id) cannot be
/// granted by members.
fn require_self_assignable(guild_id: &str, role: &RoleRef) -> Result<(), Reply> {
    if role.managed || role.id == guild_id {
        Err(Reply::rejected(NOT_SELF_ASSIGNABLE))
    } else {
        Ok(())
    }
}

fn store_failure(e: &RolecallError) -> Reply {
    error!(
        error = %e,
        unavailable = e.is_store_unavailable(),
        "Role store operation failed"
    );
    Reply::failed(STORE_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> GuildRole {
        GuildRole {
            id: name.to_lowercase(),
            name: name.to_string(),
            managed: false,
            is_everyone: false,
        }
    }

    #[test]
    fn test_sorted_names_ignores_case() {
        let names = sorted_names(vec![role("red"), role("Blue"), role("alpha")]);
        assert_eq!(names, vec!["alpha", "Blue", "red"]);
    }

    #[test]
    fn test_everyone_role_is_not_self_assignable() {
        let everyone = RoleRef::new("100", "@everyone");
        assert!(require_self_assignable("100", &everyone).is_err());
        assert!(require_self_assignable("100", &RoleRef::new("7", "Red")).is_ok());
    }

    #[test]
    fn test_managed_role_is_not_self_assignable() {
        let mut bot_role = RoleRef::new("9", "Bot");
        bot_role.managed = true;
        assert!(require_self_assignable("100", &bot_role).is_err());
    }

    #[test]
    fn test_missing_role_names_the_verb() {
        let reply = require_role(None, "remove").unwrap_err();
        assert_eq!(reply.text(), Some("Please specify a valid role to remove."));
    }
}
