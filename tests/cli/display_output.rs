//! Suggestion and call rendering

use crate::common::{channel_parser, load_workspace};
use appcmd::app::cli::display::{format_call, format_suggestion};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_colored_execute_suggestion() {
    colored::control::set_override(true);
    let workspace = load_workspace();
    let suggestions = channel_parser(&workspace)
        .get_suggestions("/jira assign PROJ-1 @bob ")
        .await;

    let line = format_suggestion(&suggestions[0], true);
    assert!(line.contains("\u{1b}["), "expected ANSI escapes: {line}");
    assert!(line.contains("Execute Current Command"));
    colored::control::unset_override();
}

#[tokio::test]
#[serial]
async fn test_plain_output_has_no_escapes() {
    colored::control::set_override(true);
    let workspace = load_workspace();
    let suggestions = channel_parser(&workspace).get_suggestions("/ji").await;

    let line = format_suggestion(&suggestions[0], false);
    assert_eq!(line, "/jira  jira  Interact with Jira");
    colored::control::unset_override();
}

#[tokio::test]
async fn test_call_renders_as_json() {
    let workspace = load_workspace();
    let call = channel_parser(&workspace)
        .compose_call_from_command("/jira assign PROJ-1 @alice")
        .await
        .into_result()
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&format_call(&call).unwrap()).unwrap();
    assert_eq!(json["path"], "/jira/assign");
    assert_eq!(json["values"]["user"]["value"], "u1");
    assert_eq!(json["context"]["channel_id"], "c1");
    assert_eq!(json["raw_command"], "/jira assign PROJ-1 @alice");
}
