//! The slash-command schema pushed to every guild.

/// Name of the role-typed option carried by `add`/`remove` subcommands.
pub const ROLE_OPTION: &str = "role";

/// A top-level slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command name
    pub name: &'static str,
    /// Command description
    pub description: &'static str,
    /// Subcommands
    pub subcommands: Vec<SubcommandSpec>,
}

/// A subcommand, optionally taking a required role argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandSpec {
    /// Subcommand name
    pub name: &'static str,
    /// Subcommand description
    pub description: &'static str,
    /// Description of the required `role` option, if the subcommand takes one
    pub role_option: Option<&'static str>,
}

impl SubcommandSpec {
    fn plain(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            role_option: None,
        }
    }

    fn with_role(
        name: &'static str,
        description: &'static str,
        role_description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            role_option: Some(role_description),
        }
    }
}

/// The fixed command set: `role list|add|remove` and `config add|remove`.
pub fn command_schema() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "role",
            description: "Manage self-assignable roles",
            subcommands: vec![
                SubcommandSpec::plain("list", "List available roles"),
                SubcommandSpec::with_role("add", "Add a role to yourself", "The role to add"),
                SubcommandSpec::with_role(
                    "remove",
                    "Remove a role from yourself",
                    "The role to remove",
                ),
            ],
        },
        CommandSpec {
            name: "config",
            description: "Configure self-assignable roles",
            subcommands: vec![
                SubcommandSpec::with_role(
                    "add",
                    "Add a role as self-assignable",
                    "The role to add",
                ),
                SubcommandSpec::with_role(
                    "remove",
                    "Remove a role from self-assignable",
                    "The role to remove",
                ),
            ],
        },
    ]
}
