//! Building a parser from settings

use crate::common::{fixture_settings, temp_file, CHANNEL_ID};
use appcmd::app::startup::build_parser;
use appcmd::commands::api::CommandError;

#[tokio::test]
async fn test_parser_from_fixture_settings() {
    let parser = build_parser(&fixture_settings()).unwrap();
    assert_eq!(parser.context().channel_id, CHANNEL_ID);
    assert!(!parser.context().in_thread());

    let call = parser
        .compose_call_from_command("/jira assign PROJ-1 @alice")
        .await
        .into_result()
        .unwrap();
    assert_eq!(call.path, "/jira/assign");
}

#[tokio::test]
async fn test_root_setting_selects_thread() {
    let mut settings = fixture_settings();
    settings.workspace.root_id = Some("p1".to_string());
    let parser = build_parser(&settings).unwrap();
    assert!(parser.context().in_thread());

    let completes: Vec<_> = parser
        .get_suggestions("/")
        .await
        .into_iter()
        .map(|s| s.complete)
        .collect();
    assert_eq!(completes, vec!["/poll"]);
}

#[tokio::test]
async fn test_catalog_setting_localises_messages() {
    let catalog = temp_file(
        ".json",
        r#"{"apps.error.command.field_missing": "Champs requis manquants : `{fieldName}`."}"#,
    );
    let mut settings = fixture_settings();
    settings.parser.catalog = Some(catalog.path().to_path_buf());
    let parser = build_parser(&settings).unwrap();

    let result = parser.compose_call_from_command("/jira assign").await;
    assert_eq!(
        result.error_message.as_deref(),
        Some("Champs requis manquants : `issue, user`.")
    );
}

#[test]
fn test_missing_fixture_is_reported() {
    let mut settings = fixture_settings();
    settings.workspace.fixture = Some("/definitely/not/here.json".into());
    let err = build_parser(&settings).unwrap_err();
    assert!(matches!(err, CommandError::Fixture { .. }));
}

#[test]
fn test_unreadable_catalog_is_reported() {
    let catalog = temp_file(".json", "not json");
    let mut settings = fixture_settings();
    settings.parser.catalog = Some(catalog.path().to_path_buf());
    let err = build_parser(&settings).unwrap_err();
    assert!(matches!(err, CommandError::Catalog { .. }));
}

#[test]
fn test_server_setting_builds_http_dispatcher() {
    let mut settings = fixture_settings();
    settings.server.url = Some("https://chat.example.com".to_string());
    assert!(build_parser(&settings).is_ok());

    settings.server.url = Some("chat.example.com".to_string());
    assert!(build_parser(&settings).is_err());
}
