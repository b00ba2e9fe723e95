//! TOML configuration tests

use crate::common::temp_file;
use appcmd::app::cli::args::Args;
use appcmd::app::cli::config::{ConfigError, Settings};
use clap::Parser;

#[tokio::test]
async fn test_full_config_file() {
    let file = temp_file(
        ".toml",
        r#"
[server]
url = "https://chat.example.com"
token = "secret"

[parser]
max_concurrent_expansions = 2

[logging]
level = "debug"
format = "ext"
color = false

[workspace]
channel_id = "c1"
team_id = "t1"
root_id = "p1"
"#,
    );

    let settings = Settings::load(Some(file.path())).await.unwrap();
    assert_eq!(settings.server.url.as_deref(), Some("https://chat.example.com"));
    assert_eq!(settings.server.token.as_deref(), Some("secret"));
    assert_eq!(settings.parser.max_concurrent_expansions, 2);
    assert_eq!(settings.logging.level.as_deref(), Some("debug"));
    assert!(!settings.logging.color);
    assert_eq!(settings.workspace.root_id.as_deref(), Some("p1"));
    assert!(settings.validate().is_ok());
}

#[tokio::test]
async fn test_command_line_wins_over_file() {
    let file = temp_file(
        ".toml",
        "[workspace]\nteam_id = \"t-file\"\n[server]\nurl = \"https://file\"\n",
    );
    let mut settings = Settings::load(Some(file.path())).await.unwrap();
    let args = Args::parse_from([
        "appcmd",
        "--team",
        "t-cli",
        "--server",
        "https://cli",
        "suggest",
        "/",
    ]);
    settings.apply_args(&args);

    assert_eq!(settings.workspace.team_id, "t-cli");
    assert_eq!(settings.server.url.as_deref(), Some("https://cli"));
}

#[tokio::test]
async fn test_malformed_file_names_path() {
    let file = temp_file(".toml", "[parser\nmax = ");
    let err = Settings::load(Some(file.path())).await.unwrap_err();
    match err {
        ConfigError::Parse { path, .. } => assert_eq!(path, file.path().display().to_string()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_non_http_server_is_invalid() {
    let mut settings = Settings::default();
    settings.server.url = Some("ftp://chat".to_string());
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::InvalidValue { ref key, .. }) if key == "server.url"
    ));
}
