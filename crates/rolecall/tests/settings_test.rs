//! Settings layering: bundled defaults, user file, environment.

use rolecall::Settings;
use std::io::Write;
use std::time::Duration;

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_bundled_defaults() {
    let settings = Settings::load_with_env(None, env(&[])).unwrap();

    assert_eq!(settings.store.pool_size, 8);
    assert_eq!(settings.store.timeout_ms, 5000);
    assert_eq!(settings.roles.reserved_prefix, "@");
    assert_eq!(settings.roles.column_size, 3);
    assert!(!settings.roles.require_available);

    let store = settings.store_settings();
    assert_eq!(store.timeout, Duration::from_secs(5));
    let dispatch = settings.dispatch_settings();
    assert_eq!(dispatch, rolecall_discord::DispatchSettings::default());
}

#[test]
fn test_file_overrides_defaults() {
    let file = settings_file("[roles]\nrequire_available = true\ncolumn_size = 5\n");

    let settings = Settings::load_with_env(Some(file.path()), env(&[])).unwrap();

    assert!(settings.roles.require_available);
    assert_eq!(settings.roles.column_size, 5);
    assert_eq!(settings.store.pool_size, 8);
}

#[test]
fn test_environment_overrides_file() {
    let file = settings_file("[store]\npool_size = 4\n");

    let settings = Settings::load_with_env(
        Some(file.path()),
        env(&[
            ("ROLECALL_STORE__POOL_SIZE", "16"),
            ("ROLECALL_ROLES__REQUIRE_AVAILABLE", "true"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.store.pool_size, 16);
    assert!(settings.roles.require_available);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(Settings::load_with_env(Some(&missing), env(&[])).is_err());
}

#[test]
fn test_zero_pool_size_is_rejected() {
    let err = Settings::load_with_env(None, env(&[("ROLECALL_STORE__POOL_SIZE", "0")]))
        .unwrap_err();
    assert!(err.message.contains("pool_size"));
}
