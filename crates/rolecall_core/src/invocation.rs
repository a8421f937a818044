//! Inbound slash-command invocations.

use crate::RoleRef;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The membership context of the user issuing a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokingMember {
    /// Roles the member currently holds
    pub role_ids: Vec<String>,
    /// Member holds the administrator capability
    pub administrator: bool,
}

impl InvokingMember {
    /// Whether the member holds `role_id`.
    pub fn has_role(&self, role_id: &str) -> bool {
        self.role_ids.iter().any(|id| id == role_id)
    }
}

/// A recognized command/subcommand pair and its role argument.
///
/// # Examples
///
/// ```
/// use rolecall_core::{RoleCommand, RoleRef};
///
/// let cmd = RoleCommand::parse("config", Some("add"), Some(RoleRef::new("7", "Red")));
/// assert!(matches!(cmd, RoleCommand::ConfigAdd(Some(_))));
///
/// let cmd = RoleCommand::parse("role", None, None);
/// assert!(matches!(cmd, RoleCommand::Unknown { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleCommand {
    /// `role list`
    RoleList,
    /// `role add`
    RoleAdd(Option<RoleRef>),
    /// `role remove`
    RoleRemove(Option<RoleRef>),
    /// `config add`
    ConfigAdd(Option<RoleRef>),
    /// `config remove`
    ConfigRemove(Option<RoleRef>),
    /// Anything the schema does not declare
    Unknown {
        /// Top-level command name
        command: String,
        /// Subcommand name, if one was sent
        subcommand: Option<String>,
    },
}

impl RoleCommand {
    /// Route a command name, subcommand name, and role option to a variant.
    pub fn parse(command: &str, subcommand: Option<&str>, role: Option<RoleRef>) -> Self {
        match (command, subcommand) {
            ("role", Some("list")) => Self::RoleList,
            ("role", Some("add")) => Self::RoleAdd(role),
            ("role", Some("remove")) => Self::RoleRemove(role),
            ("config", Some("add")) => Self::ConfigAdd(role),
            ("config", Some("remove")) => Self::ConfigRemove(role),
            _ => Self::Unknown {
                command: command.to_string(),
                subcommand: subcommand.map(str::to_string),
            },
        }
    }

    /// Short `command.subcommand` label for logs.
    pub fn label(&self) -> String {
        match self {
            Self::RoleList => "role.list".to_string(),
            Self::RoleAdd(_) => "role.add".to_string(),
            Self::RoleRemove(_) => "role.remove".to_string(),
            Self::ConfigAdd(_) => "config.add".to_string(),
            Self::ConfigRemove(_) => "config.remove".to_string(),
            Self::Unknown {
                command,
                subcommand,
            } => match subcommand {
                Some(sub) => format!("{}.{}", command, sub),
                None => command.clone(),
            },
        }
    }
}

/// One inbound slash-command event.
///
/// # Examples
///
/// ```
/// use rolecall_core::{InvocationBuilder, RoleCommand};
///
/// let invocation = InvocationBuilder::default()
///     .guild_id("100")
///     .user_id("200")
///     .command(RoleCommand::RoleList)
///     .build()
///     .unwrap();
///
/// assert_eq!(invocation.guild_id().as_deref(), Some("100"));
/// assert!(invocation.member().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Invocation {
    /// Guild the command was issued in, absent for direct messages
    #[builder(default, setter(into, strip_option))]
    guild_id: Option<String>,
    /// Invoking user
    user_id: String,
    /// Invoker's membership in the guild
    #[builder(default, setter(strip_option))]
    member: Option<InvokingMember>,
    /// The routed command
    command: RoleCommand,
}

impl Invocation {
    /// Create an invocation from its parts.
    pub fn new(
        guild_id: Option<String>,
        user_id: impl Into<String>,
        member: Option<InvokingMember>,
        command: RoleCommand,
    ) -> Self {
        Self {
            guild_id,
            user_id: user_id.into(),
            member,
            command,
        }
    }
}
