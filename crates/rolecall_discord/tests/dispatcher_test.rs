//! Dispatcher behavior against in-memory ports.


use rolecall_core::{InvocationBuilder, Reply, ReplyBody, ReplyStatus, RoleCommand, RoleRef};
use rolecall_discord::{DispatchSettings, Dispatcher};
use std::sync::Arc;
use test_helpers::{
    GUILD, MemoryStore, MockPlatform, RoleCall, USER, guild_role, invocation, member,
};

fn dispatcher(store: &Arc<MemoryStore>, platform: &Arc<MockPlatform>) -> Dispatcher {
    Dispatcher::new(store.clone(), platform.clone(), DispatchSettings::default())
}

fn red() -> RoleRef {
    RoleRef::new("7", "Red")
}

fn listed_names(reply: &Reply) -> Vec<String> {
    match &reply.body {
        ReplyBody::Columns { pages, .. } => pages
            .iter()
            .flatten()
            .flat_map(|column| column.lines().map(str::to_string))
            .collect(),
        ReplyBody::Text(text) => panic!("expected columns, got text: {}", text),
    }
}

#[tokio::test]
async fn test_list_excludes_managed_and_reserved_roles() {
    let mut admin = guild_role("1", "Admin");
    admin.managed = true;
    let mut everyone = guild_role(GUILD, "@everyone");
    everyone.is_everyone = true;
    let platform = Arc::new(MockPlatform::with_roles(vec![
        admin,
        everyone,
        guild_role("2", "Red"),
        guild_role("3", "Blue"),
    ]));
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(RoleCommand::RoleList, member(&[], false)))
        .await;

    assert_eq!(reply.status, ReplyStatus::Completed);
    assert_eq!(listed_names(&reply), vec!["Blue", "Red"]);
    match &reply.body {
        ReplyBody::Columns { title, .. } => assert_eq!(title, "Available Roles"),
        ReplyBody::Text(_) => unreachable!(),
    }
}

#[tokio::test]
async fn test_list_with_no_roles_is_plain_message() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(RoleCommand::RoleList, member(&[], false)))
        .await;

    assert_eq!(reply, Reply::completed("No roles available."));
}

#[tokio::test]
async fn test_list_groups_names_in_threes() {
    let roles = ["G", "A", "E", "C", "B", "F", "D"]
        .iter()
        .enumerate()
        .map(|(i, name)| guild_role(&(i + 10).to_string(), name))
        .collect();
    let platform = Arc::new(MockPlatform::with_roles(roles));
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(RoleCommand::RoleList, member(&[], false)))
        .await;

    match reply.body {
        ReplyBody::Columns { pages, .. } => {
            assert_eq!(pages, vec![vec!["A\nB\nC", "D\nE\nF", "G"]]);
        }
        ReplyBody::Text(text) => panic!("unexpected text: {}", text),
    }
}

#[tokio::test]
async fn test_non_administrator_config_add_is_rejected() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::ConfigAdd(Some(red())),
            member(&[], false),
        ))
        .await;

    assert_eq!(
        reply,
        Reply::rejected("You do not have permission to use this command.")
    );
    assert_eq!(store.touches(), 0);
}

#[tokio::test]
async fn test_administrator_config_add_then_repeat() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let dispatcher = dispatcher(&store, &platform);
    let add = invocation(RoleCommand::ConfigAdd(Some(red())), member(&[], true));

    let first = dispatcher.dispatch(&add).await;
    assert_eq!(
        first,
        Reply::completed("Role Red has been added to the available roles.")
    );
    assert_eq!(store.available(GUILD), vec!["7"]);
    assert_eq!(store.writes(), 1);

    let second = dispatcher.dispatch(&add).await;
    assert_eq!(second, Reply::completed("Role Red is already available."));
    assert_eq!(store.available(GUILD), vec!["7"]);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_config_add_then_remove_restores_list() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::with_available(GUILD, &["3"]));
    let dispatcher = dispatcher(&store, &platform);
    let admin = member(&[], true);

    dispatcher
        .dispatch(&invocation(RoleCommand::ConfigAdd(Some(red())), admin.clone()))
        .await;
    let removed = dispatcher
        .dispatch(&invocation(RoleCommand::ConfigRemove(Some(red())), admin.clone()))
        .await;

    assert_eq!(
        removed,
        Reply::completed("Role Red has been removed from the available roles.")
    );
    assert_eq!(store.available(GUILD), vec!["3"]);

    let again = dispatcher
        .dispatch(&invocation(RoleCommand::ConfigRemove(Some(red())), admin))
        .await;
    assert_eq!(again, Reply::completed("Role Red is not in the available roles."));
}

#[tokio::test]
async fn test_config_without_role_argument_is_rejected() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(RoleCommand::ConfigRemove(None), member(&[], true)))
        .await;

    assert_eq!(
        reply,
        Reply::rejected("Please specify a valid role to remove.")
    );
    assert_eq!(store.touches(), 0);
}

#[tokio::test]
async fn test_config_without_member_is_rejected() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let no_member = InvocationBuilder::default()
        .guild_id(GUILD)
        .user_id(USER)
        .command(RoleCommand::ConfigAdd(Some(red())))
        .build()
        .unwrap();

    let reply = dispatcher(&store, &platform).dispatch(&no_member).await;

    assert_eq!(
        reply,
        Reply::rejected("This command is restricted to members only.")
    );
    assert_eq!(store.touches(), 0);
}

#[tokio::test]
async fn test_commands_outside_guild_are_rejected() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let direct_message = InvocationBuilder::default()
        .user_id(USER)
        .command(RoleCommand::RoleAdd(Some(red())))
        .build()
        .unwrap();

    let reply = dispatcher(&store, &platform).dispatch(&direct_message).await;

    assert_eq!(
        reply,
        Reply::rejected("This command can only be used in a server.")
    );
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_store_outage_is_reported_as_failure() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::unavailable());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::ConfigAdd(Some(red())),
            member(&[], true),
        ))
        .await;

    assert_eq!(reply.status, ReplyStatus::Failed);
    assert_ne!(
        reply.text(),
        Some("Role Red is already available."),
        "an outage must not look like no change"
    );
}

#[tokio::test]
async fn test_role_add_grants_once() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(red())),
            member(&[], false),
        ))
        .await;

    assert_eq!(reply, Reply::completed("Role Red has been added to you."));
    assert_eq!(
        platform.calls(),
        vec![RoleCall::Grant(GUILD.into(), USER.into(), "7".into())]
    );
}

#[tokio::test]
async fn test_role_add_when_already_held() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(red())),
            member(&["7"], false),
        ))
        .await;

    assert_eq!(reply, Reply::rejected("You already have that role."));
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_role_remove_revokes_held_role() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let dispatcher = dispatcher(&store, &platform);

    let missing = dispatcher
        .dispatch(&invocation(
            RoleCommand::RoleRemove(Some(red())),
            member(&[], false),
        ))
        .await;
    assert_eq!(missing, Reply::rejected("You don't have that role."));

    let removed = dispatcher
        .dispatch(&invocation(
            RoleCommand::RoleRemove(Some(red())),
            member(&["7"], false),
        ))
        .await;
    assert_eq!(removed, Reply::completed("Role Red has been removed from you."));
    assert_eq!(
        platform.calls(),
        vec![RoleCall::Revoke(GUILD.into(), USER.into(), "7".into())]
    );
}

#[tokio::test]
async fn test_platform_failure_yields_generic_reply() {
    let platform = Arc::new(MockPlatform::failing());
    let store = Arc::new(MemoryStore::default());

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(red())),
            member(&[], false),
        ))
        .await;

    assert_eq!(reply, Reply::failed("Failed to add the role."));
}

#[tokio::test]
async fn test_managed_role_cannot_be_self_assigned() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let mut managed = red();
    managed.managed = true;

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(managed)),
            member(&[], false),
        ))
        .await;

    assert_eq!(reply.status, ReplyStatus::Rejected);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    let platform = Arc::new(MockPlatform::default());
    let store = Arc::new(MemoryStore::default());
    let unknown = RoleCommand::parse("role", Some("rename"), None);

    let reply = dispatcher(&store, &platform)
        .dispatch(&invocation(unknown, member(&[], true)))
        .await;

    assert_eq!(reply, Reply::rejected("Unknown command."));
}

#[tokio::test]
async fn test_enforced_curation_limits_list_and_add() {
    let platform = Arc::new(MockPlatform::with_roles(vec![
        guild_role("7", "Red"),
        guild_role("8", "Blue"),
    ]));
    let store = Arc::new(MemoryStore::with_available(GUILD, &["7"]));
    let settings = DispatchSettings {
        require_available: true,
        ..DispatchSettings::default()
    };
    let dispatcher = Dispatcher::new(store.clone(), platform.clone(), settings);

    let listed = dispatcher
        .dispatch(&invocation(RoleCommand::RoleList, member(&[], false)))
        .await;
    assert_eq!(listed_names(&listed), vec!["Red"]);

    let blue = dispatcher
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(RoleRef::new("8", "Blue"))),
            member(&[], false),
        ))
        .await;
    assert_eq!(
        blue,
        Reply::rejected("That role is not self-assignable in this server.")
    );

    let granted = dispatcher
        .dispatch(&invocation(
            RoleCommand::RoleAdd(Some(red())),
            member(&[], false),
        ))
        .await;
    assert_eq!(granted.status, ReplyStatus::Completed);
    assert_eq!(platform.calls().len(), 1);
}
