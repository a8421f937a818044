//! Conversions between Serenity types and Rolecall types.

use rolecall_core::{
    CommandSpec, Invocation, InvokingMember, ROLE_OPTION, Reply, ReplyBody, ReplyStatus,
    RoleCommand, RoleRef,
};
use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, Member, ResolvedOption,
    ResolvedValue, Role,
};

/// Name of every embed field; the zero-width space hides it.
const BLANK_FIELD_NAME: &str = "\u{200B}";

/// Build Serenity command builders from the command schema.
pub fn create_commands(schema: &[CommandSpec]) -> Vec<CreateCommand> {
    schema
        .iter()
        .map(|spec| {
            spec.subcommands.iter().fold(
                CreateCommand::new(spec.name).description(spec.description),
                |command, sub| {
                    let mut option = CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        sub.name,
                        sub.description,
                    );
                    if let Some(role_description) = sub.role_option {
                        option = option.add_sub_option(
                            CreateCommandOption::new(
                                CommandOptionType::Role,
                                ROLE_OPTION,
                                role_description,
                            )
                            .required(true),
                        );
                    }
                    command.add_option(option)
                },
            )
        })
        .collect()
}

fn role_ref(role: &Role) -> RoleRef {
    RoleRef {
        id: role.id.to_string(),
        name: role.name.clone(),
        managed: role.managed,
    }
}

fn invoking_member(member: &Member) -> InvokingMember {
    InvokingMember {
        role_ids: member.roles.iter().map(|id| id.to_string()).collect(),
        administrator: member
            .permissions
            .is_some_and(|permissions| permissions.administrator()),
    }
}

/// Split resolved options into the subcommand name and its `role` argument.
fn subcommand_and_role<'a>(
    options: &[ResolvedOption<'a>],
) -> (Option<&'a str>, Option<RoleRef>) {
    let Some(first) = options.first() else {
        return (None, None);
    };
    let ResolvedValue::SubCommand(sub_options) = &first.value else {
        return (None, None);
    };

    let role = sub_options
        .iter()
        .find_map(|option| match &option.value {
            ResolvedValue::Role(role) if option.name == ROLE_OPTION => Some(role_ref(role)),
            _ => None,
        });

    (Some(first.name), role)
}

/// Translate an inbound command interaction.
pub fn invocation_from_command(command: &CommandInteraction) -> Invocation {
    let options = command.data.options();
    let (subcommand, role) = subcommand_and_role(&options);

    Invocation::new(
        command.guild_id.map(|id| id.to_string()),
        command.user.id.to_string(),
        command.member.as_deref().map(invoking_member),
        RoleCommand::parse(&command.data.name, subcommand, role),
    )
}

/// One embed per page, each field an unnamed inline column.
fn embeds_from_pages(title: &str, pages: &[Vec<String>]) -> Vec<CreateEmbed> {
    pages
        .iter()
        .map(|columns| {
            columns
                .iter()
                .fold(CreateEmbed::new().title(title), |embed, column| {
                    embed.field(BLANK_FIELD_NAME, column, true)
                })
        })
        .collect()
}

/// Whether a reply is shown only to the invoker.
///
/// Rejections and failures are private.
pub fn is_private(reply: &Reply) -> bool {
    reply.status != ReplyStatus::Completed
}

/// Render a reply as the initial interaction response.
pub fn response_from_reply(reply: &Reply) -> CreateInteractionResponse {
    let message = match &reply.body {
        ReplyBody::Text(text) => CreateInteractionResponseMessage::new().content(text),
        ReplyBody::Columns { title, pages } => {
            CreateInteractionResponseMessage::new().embeds(embeds_from_pages(title, pages))
        }
    };

    CreateInteractionResponse::Message(message.ephemeral(is_private(reply)))
}

/// Acknowledge an interaction whose reply follows later.
pub fn deferred_response() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new())
}

/// Fill a deferred response with a public reply.
pub fn edit_from_reply(reply: &Reply) -> EditInteractionResponse {
    match &reply.body {
        ReplyBody::Text(text) => EditInteractionResponse::new().content(text),
        ReplyBody::Columns { title, pages } => {
            EditInteractionResponse::new().embeds(embeds_from_pages(title, pages))
        }
    }
}

/// Render a reply as a followup message, private when [`is_private`].
pub fn followup_from_reply(reply: &Reply) -> CreateInteractionResponseFollowup {
    let followup = match &reply.body {
        ReplyBody::Text(text) => CreateInteractionResponseFollowup::new().content(text),
        ReplyBody::Columns { title, pages } => {
            CreateInteractionResponseFollowup::new().embeds(embeds_from_pages(title, pages))
        }
    };

    followup.ephemeral(is_private(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolecall_core::command_schema;
    use serde_json::{Value, json};

    const EPHEMERAL: u64 = 1 << 6;

    fn user() -> Value {
        json!({
            "id": "200",
            "username": "tester",
            "discriminator": "0",
            "global_name": null,
            "avatar": null
        })
    }

    fn guild_command(name: &str, subcommand: Value) -> CommandInteraction {
        serde_json::from_value(json!({
            "id": "900",
            "application_id": "901",
            "type": 2,
            "data": {
                "id": "902",
                "name": name,
                "type": 1,
                "options": [subcommand],
                "resolved": {
                    "roles": {
                        "7": {
                            "id": "7",
                            "name": "Red",
                            "color": 0,
                            "hoist": false,
                            "icon": null,
                            "unicode_emoji": null,
                            "position": 1,
                            "permissions": "0",
                            "managed": false,
                            "mentionable": false,
                            "flags": 0
                        }
                    }
                }
            },
            "guild_id": "100",
            "channel_id": "300",
            "member": {
                "user": user(),
                "nick": null,
                "avatar": null,
                "roles": ["5"],
                "joined_at": "2024-01-01T00:00:00.000000+00:00",
                "premium_since": null,
                "deaf": false,
                "mute": false,
                "flags": 0,
                "pending": false,
                "permissions": "8",
                "communication_disabled_until": null
            },
            "token": "token",
            "version": 1,
            "app_permissions": "8",
            "locale": "en-US",
            "guild_locale": "en-US",
            "entitlements": [],
            "authorizing_integration_owners": { "0": "100" },
            "context": 0
        }))
        .unwrap()
    }

    fn direct_message_command() -> CommandInteraction {
        serde_json::from_value(json!({
            "id": "910",
            "application_id": "901",
            "type": 2,
            "data": {
                "id": "902",
                "name": "role",
                "type": 1,
                "options": [{ "name": "list", "type": 1 }]
            },
            "channel_id": "301",
            "user": user(),
            "token": "token",
            "version": 1,
            "app_permissions": "0",
            "locale": "en-US",
            "entitlements": [],
            "authorizing_integration_owners": { "1": "200" },
            "context": 1
        }))
        .unwrap()
    }

    fn role_subcommand(name: &str) -> Value {
        json!({
            "name": name,
            "type": 1,
            "options": [{ "name": "role", "type": 8, "value": "7" }]
        })
    }

    fn flags(response: &Value) -> u64 {
        response["data"]["flags"].as_u64().unwrap_or(0)
    }

    #[test]
    fn test_schema_builds_one_builder_per_command() {
        assert_eq!(create_commands(&command_schema()).len(), 2);
    }

    #[test]
    fn test_config_add_resolves_role_argument() {
        let command = guild_command("config", role_subcommand("add"));
        let invocation = invocation_from_command(&command);

        assert_eq!(invocation.guild_id().as_deref(), Some("100"));
        assert_eq!(invocation.user_id(), "200");
        assert_eq!(
            invocation.command(),
            &RoleCommand::ConfigAdd(Some(RoleRef::new("7", "Red")))
        );

        let member = invocation.member().as_ref().unwrap();
        assert!(member.administrator);
        assert_eq!(member.role_ids, vec!["5"]);
    }

    #[test]
    fn test_role_remove_resolves_role_argument() {
        let command = guild_command("role", role_subcommand("remove"));
        let invocation = invocation_from_command(&command);

        assert_eq!(
            invocation.command(),
            &RoleCommand::RoleRemove(Some(RoleRef::new("7", "Red")))
        );
    }

    #[test]
    fn test_direct_message_has_no_guild_or_member() {
        let invocation = invocation_from_command(&direct_message_command());

        assert_eq!(invocation.guild_id(), &None);
        assert_eq!(invocation.member(), &None);
        assert_eq!(invocation.user_id(), "200");
        assert_eq!(invocation.command(), &RoleCommand::RoleList);
    }

    #[test]
    fn test_rejections_and_failures_are_ephemeral() {
        for reply in [Reply::rejected("no"), Reply::failed("broken")] {
            let response = serde_json::to_value(response_from_reply(&reply)).unwrap();
            assert_eq!(response["type"], 4);
            assert_eq!(flags(&response) & EPHEMERAL, EPHEMERAL);

            let followup = serde_json::to_value(followup_from_reply(&reply)).unwrap();
            assert_eq!(followup["flags"].as_u64().unwrap_or(0) & EPHEMERAL, EPHEMERAL);
        }
    }

    #[test]
    fn test_completed_text_is_public() {
        let reply = Reply::completed("Role Red has been added to you.");
        let response = serde_json::to_value(response_from_reply(&reply)).unwrap();

        assert_eq!(flags(&response) & EPHEMERAL, 0);
        assert_eq!(response["data"]["content"], "Role Red has been added to you.");

        let edit = serde_json::to_value(edit_from_reply(&reply)).unwrap();
        assert_eq!(edit["content"], "Role Red has been added to you.");
    }

    #[test]
    fn test_columns_become_one_embed_per_page() {
        let pages = vec![
            vec!["A\nB\nC".to_string(), "D".to_string()],
            vec!["E".to_string()],
        ];
        let reply = Reply::columns("Available Roles", pages);
        let response = serde_json::to_value(response_from_reply(&reply)).unwrap();

        let embeds = response["data"]["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0]["title"], "Available Roles");

        let fields = embeds[0]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], BLANK_FIELD_NAME);
        assert_eq!(fields[0]["value"], "A\nB\nC");
        assert_eq!(fields[0]["inline"], true);
        assert_eq!(embeds[1]["fields"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_deferred_response_acknowledges() {
        let response = serde_json::to_value(deferred_response()).unwrap();
        assert_eq!(response["type"], 5);
    }
}
