use rolecall_core::{RoleCommand, RoleRef, command_schema};

#[test]
fn test_schema_declares_role_and_config() {
    let schema = command_schema();
    let names: Vec<&str> = schema.iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["role", "config"]);

    let role_subs: Vec<&str> = schema[0].subcommands.iter().map(|s| s.name).collect();
    assert_eq!(role_subs, vec!["list", "add", "remove"]);

    let config_subs: Vec<&str> = schema[1].subcommands.iter().map(|s| s.name).collect();
    assert_eq!(config_subs, vec!["add", "remove"]);
}

#[test]
fn test_only_list_has_no_role_option() {
    for command in command_schema() {
        for sub in command.subcommands {
            assert_eq!(sub.role_option.is_none(), sub.name == "list");
        }
    }
}

#[test]
fn test_every_declared_pair_parses_to_a_known_command() {
    for command in command_schema() {
        for sub in command.subcommands {
            let parsed = RoleCommand::parse(command.name, Some(sub.name), None);
            assert!(
                !matches!(parsed, RoleCommand::Unknown { .. }),
                "{}.{} should route",
                command.name,
                sub.name
            );
        }
    }
}

#[test]
fn test_undeclared_pair_is_unknown() {
    let parsed = RoleCommand::parse("config", Some("list"), Some(RoleRef::new("1", "Red")));
    assert_eq!(parsed.label(), "config.list");
    assert!(matches!(parsed, RoleCommand::Unknown { .. }));
}
