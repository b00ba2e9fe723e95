use super::helpers::*;
use crate::commands::api::*;
use std::sync::Arc;

async fn suggest(pretext: &str) -> Vec<AutocompleteSuggestion> {
    let workspace = workspace();
    parser(&workspace).get_suggestions(pretext).await
}

#[tokio::test]
async fn test_requires_leading_slash() {
    assert!(suggest("jira").await.is_empty());
    assert!(suggest("").await.is_empty());
}

#[tokio::test]
async fn test_no_bindings_no_suggestions() {
    let workspace = Arc::new(Workspace::default());
    assert!(parser(&workspace).get_suggestions("/").await.is_empty());
}

#[tokio::test]
async fn test_top_level_command() {
    let suggestions = suggest("/ji").await;
    assert_eq!(completes(&suggestions), vec!["/jira"]);
    let jira = &suggestions[0];
    assert_eq!(jira.suggestion, "jira");
    assert_eq!(jira.description, "Interact with Jira");
    assert_eq!(jira.icon_data, "jira.png");
    assert_eq!(jira.kind, SuggestionKind::Command);
}

#[tokio::test]
async fn test_sub_commands_by_prefix() {
    assert_eq!(
        completes(&suggest("/jira c").await),
        vec!["/jira create", "/jira comment"]
    );
    assert_eq!(
        completes(&suggest("/jira ").await),
        vec!["/jira create", "/jira comment", "/jira subscribe"]
    );
    assert_eq!(completes(&suggest("/JIRA SUB").await), vec!["/JIRA subscribe"]);
}

#[tokio::test]
async fn test_first_positional_is_suggested() {
    let suggestions = suggest("/jira create ").await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].complete, "/jira create");
    assert_eq!(suggestions[0].hint, "[project key]");
}

#[tokio::test]
async fn test_execute_suggestion_comes_first() {
    let suggestions = suggest("/jira create P ").await;
    let execute = &suggestions[0];
    assert!(execute.is_execute());
    assert_eq!(
        execute.complete,
        format!("/jira create P {}", EXECUTE_CURRENT_COMMAND_ITEM_ID)
    );
    assert_eq!(execute.suggestion, "Execute Current Command");
    assert_eq!(
        execute.description,
        "Select this option or use Ctrl + Enter to execute the current command."
    );

    // Fields that already have a value are not offered again
    assert_eq!(
        completes(&suggestions[1..]),
        vec![
            "/jira create P --summary",
            "/jira create P --silent",
            "/jira create P --assignee",
            "/jira create P --channel",
            "/jira create P --priority",
            "/jira create P --epic",
        ]
    );
    assert_eq!(suggestions[1].suggestion, "--summary");
    assert_eq!(suggestions[1].description, "Ticket title");
}

#[tokio::test]
async fn test_no_execute_while_required_field_missing() {
    let suggestions = suggest("/jira create --silent ").await;
    assert!(suggestions.iter().all(|s| !s.is_execute()));
}

#[tokio::test]
async fn test_flag_names_keep_typed_dashes() {
    assert_eq!(
        completes(&suggest("/jira create P --s").await),
        vec!["/jira create P --summary", "/jira create P --silent"]
    );
    assert_eq!(
        completes(&suggest("/jira create P -su").await),
        vec!["/jira create P --summary"]
    );
    assert_eq!(
        completes(&suggest("/jira create P \u{2014}su").await),
        vec!["/jira create P \u{2014}summary"]
    );
}

#[tokio::test]
async fn test_boolean_values() {
    assert_eq!(
        completes(&suggest("/jira create P --silent ").await),
        vec!["/jira create P --silent true", "/jira create P --silent false"]
    );
    assert_eq!(
        completes(&suggest("/jira create P --silent f").await),
        vec!["/jira create P --silent false"]
    );
}

#[tokio::test]
async fn test_static_select_options() {
    let suggestions = suggest("/jira create P --priority ").await;
    assert_eq!(
        completes(&suggestions),
        vec![
            "/jira create P --priority high",
            "/jira create P --priority low",
            "/jira create P --priority `very low`",
        ]
    );
    assert_eq!(suggestions[2].suggestion, "Very low");

    assert_eq!(
        completes(&suggest(r#"/jira create P --priority "v"#).await),
        vec![r#"/jira create P --priority "very low""#]
    );
}

#[tokio::test]
async fn test_static_select_without_match() {
    let suggestions = suggest("/jira create P --priority x").await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, SuggestionKind::Error);
    assert_eq!(suggestions[0].hint, "No matching options.");
    assert_eq!(suggestions[0].icon_data, COMMAND_SUGGESTION_ERROR);
}

#[tokio::test]
async fn test_dynamic_select_lookup() {
    let workspace = workspace();
    let suggestions = parser(&workspace)
        .get_suggestions("/jira create P --epic ep")
        .await;

    assert_eq!(
        completes(&suggestions),
        vec![
            "/jira create P --epic epic-1",
            "/jira create P --epic `epic 2`"
        ]
    );
    assert_eq!(suggestions[0].description, "Epic One");

    let (call_type, request) = workspace.calls().pop().unwrap();
    assert_eq!(call_type, CallType::Lookup);
    assert_eq!(request.path, "/jira/create");
    assert_eq!(request.selected_field.as_deref(), Some("epic"));
    assert_eq!(request.query.as_deref(), Some("ep"));
    assert_eq!(request.values["project"], CallValue::text("P"));
}

#[tokio::test]
async fn test_dynamic_select_without_items() {
    let suggestions = suggest("/jira create P --epic zz").await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].hint,
        "No data was returned for dynamic suggestions"
    );
}

#[tokio::test]
async fn test_dynamic_select_unexpected_response() {
    let mut data = workspace_data();
    data.responses.insert(
        "lookup:/jira/create".to_string(),
        CallResponse {
            response_type: "navigate".to_string(),
            ..Default::default()
        },
    );
    let workspace = Arc::new(Workspace::new(data));
    let suggestions = parser(&workspace)
        .get_suggestions("/jira create P --epic ep")
        .await;

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].hint, "Dynamic select error");
    assert_eq!(
        suggestions[0].description,
        "Error: App response type was not expected. Response type: navigate."
    );
}

#[tokio::test]
async fn test_user_and_channel_values() {
    let suggestions = suggest("/jira create P --assignee @b").await;
    assert_eq!(completes(&suggestions), vec!["/jira create P --assignee @bob"]);
    assert_eq!(suggestions[0].kind, SuggestionKind::User);
    assert!(matches!(
        suggestions[0].item,
        Some(SuggestionItem::User(ref user)) if user.id == "u2"
    ));

    let suggestions = suggest("/jira create P --channel ~off").await;
    assert_eq!(
        completes(&suggestions),
        vec!["/jira create P --channel ~off-topic"]
    );
    assert_eq!(suggestions[0].description, "Off-Topic");
}

#[tokio::test]
async fn test_unknown_user_gives_no_sentinel() {
    assert!(suggest("/jira create P --assignee @zz").await.is_empty());
}

#[tokio::test]
async fn test_mentions_inside_free_text() {
    assert_eq!(
        completes(&suggest(r#"/jira create P --summary "ping @al"#).await),
        vec![r#"/jira create P --summary "ping @alice""#]
    );
}

#[tokio::test]
async fn test_readonly_and_markdown_flags_are_hidden() {
    let suggestions = suggest("/jira subscribe --").await;
    let flags: Vec<_> = suggestions
        .iter()
        .filter(|s| !s.is_execute())
        .map(|s| s.suggestion.as_str())
        .collect();
    assert_eq!(
        flags,
        vec!["--project", "--frequency", "--notify", "--target", "--watcher"]
    );
}

#[tokio::test]
async fn test_empty_value_keeps_equals_sign() {
    assert_eq!(
        completes(&suggest("/jira create P --summary=").await),
        vec!["/jira create P --summary="]
    );
    assert_eq!(
        completes(&suggest("/jira create P --summary ").await),
        vec!["/jira create P --summary"]
    );
}

#[tokio::test]
async fn test_no_matching_flag_sentinel() {
    let suggestions = suggest("/jira create P --zzz").await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].hint, "No matching suggestions.");
}

#[tokio::test]
async fn test_parse_error_suggestion_keeps_buffer() {
    let suggestions = suggest("/jira create P Q").await;
    assert_eq!(suggestions.len(), 1);
    let error = &suggestions[0];
    assert_eq!(error.kind, SuggestionKind::Error);
    assert_eq!(error.complete, "/jira create P Q");
    assert_eq!(error.hint, "Parsing error");
    assert_eq!(error.description, "Unable to identify argument.");
}

#[tokio::test]
async fn test_rest_field_offers_execute() {
    let suggestions = suggest("/jira comment PROJ-1 some text").await;
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0].is_execute());
    assert_eq!(suggestions[1].complete, "/jira comment PROJ-1 some text");
}

#[tokio::test]
async fn test_every_prefix_yields_suggestions() {
    let workspace = workspace();
    let parser = parser(&workspace);
    let command = r#"/jira create MYPROJ --summary "big bug" --priority high --silent"#;

    for end in 1..=command.len() {
        let pretext = &command[..end];
        let suggestions = parser.get_suggestions(pretext).await;
        assert!(!suggestions.is_empty(), "no suggestions for '{}'", pretext);
    }
    // The form is fetched once and then served from the cache
    assert_eq!(workspace.call_count(CallType::Form), 1);
}
