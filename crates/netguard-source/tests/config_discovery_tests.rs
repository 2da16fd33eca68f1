use std::fs;

use netguard_source::{find_config, ConfigError, NetguardConfig, ScanModeConfig, CONFIG_FILE_NAME};

#[test]
fn finds_config_in_start_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "[scan]\nmode = \"marked\"\n").unwrap();

    let found = find_config(dir.path()).unwrap();
    assert_eq!(found, config_path);

    let config = NetguardConfig::load(&found).unwrap();
    assert_eq!(config.scan.mode, ScanModeConfig::Marked);
}

#[test]
fn finds_config_in_ancestor_of_a_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
    let nested = dir.path().join("app").join("src");
    fs::create_dir_all(&nested).unwrap();
    let unit = nested.join("Client.json");
    fs::write(&unit, "{}").unwrap();

    let found = find_config(&unit).unwrap();
    assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NetguardConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn parse_error_points_into_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[effects]\nbuiltin = \"yes\"\n").unwrap();

    match NetguardConfig::load(&path).unwrap_err() {
        ConfigError::Parse { span, message, .. } => {
            let span = span.expect("toml reports a span for type errors");
            assert_eq!(span.offset(), 20);
            assert!(message.contains("bool"), "unexpected message: {message}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
