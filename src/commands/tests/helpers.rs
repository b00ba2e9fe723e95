//! Shared test workspace: a `/jira` app with one fetched and two embedded forms

use crate::commands::api::*;
use std::sync::Arc;

pub const CHANNEL_ID: &str = "c1";
pub const TEAM_ID: &str = "t1";

pub fn field(name: &str, field_type: FieldType) -> AppField {
    AppField {
        name: name.to_string(),
        label: Some(name.to_string()),
        field_type,
        ..Default::default()
    }
}

/// Form of `/jira create`, served by the dispatcher
pub fn create_form() -> AppForm {
    AppForm {
        title: Some("Create ticket".to_string()),
        fields: vec![
            AppField {
                position: Some(1),
                is_required: true,
                hint: Some("[project key]".to_string()),
                ..field("project", FieldType::Text)
            },
            AppField {
                description: Some("Ticket title".to_string()),
                ..field("summary", FieldType::Text)
            },
            field("silent", FieldType::Bool),
            field("assignee", FieldType::User),
            field("channel", FieldType::Channel),
            AppField {
                options: vec![
                    SelectOption::new("High", "high"),
                    SelectOption::new("Low", "low"),
                    SelectOption::new("Very low", "very low"),
                ],
                ..field("priority", FieldType::StaticSelect)
            },
            field("epic", FieldType::DynamicSelect),
        ],
        call: Some(AppCall::new("/jira/create")),
        source_of_truth: false,
    }
}

/// Form of `/jira comment`: an issue key and free text
pub fn comment_form() -> AppForm {
    AppForm {
        fields: vec![
            AppField {
                position: Some(1),
                is_required: true,
                ..field("issue", FieldType::Text)
            },
            AppField {
                position: Some(REST_POSITION),
                is_required: true,
                ..field("message", FieldType::Text)
            },
        ],
        ..Default::default()
    }
}

/// Form of `/jira subscribe`: defaults for every kind of field, plus a
/// markdown blurb sharing the first position
pub fn subscribe_form() -> AppForm {
    AppForm {
        fields: vec![
            AppField {
                position: Some(1),
                ..field("about", FieldType::Markdown)
            },
            AppField {
                position: Some(1),
                ..field("project", FieldType::Text)
            },
            AppField {
                value: Some(FieldDefault::Text("weekly".to_string())),
                ..field("frequency", FieldType::Text)
            },
            AppField {
                value: Some(FieldDefault::Bool(true)),
                ..field("notify", FieldType::Bool)
            },
            AppField {
                value: Some(FieldDefault::Option(SelectOption::new("Alice", "u1"))),
                readonly: true,
                ..field("owner", FieldType::User)
            },
            AppField {
                value: Some(FieldDefault::Option(SelectOption::new("Town Square", "c1"))),
                ..field("target", FieldType::Channel)
            },
            AppField {
                value: Some(FieldDefault::Option(SelectOption::new("Ghost", "u404"))),
                ..field("watcher", FieldType::User)
            },
        ],
        ..Default::default()
    }
}

/// `create` carries no form; `comment` and `subscribe` embed theirs
pub fn jira_bindings(embed_create_form: bool) -> Vec<AppBinding> {
    vec![AppBinding {
        label: "jira".to_string(),
        app_id: Some("jira".to_string()),
        location: Some("/command/jira".to_string()),
        description: Some("Interact with Jira".to_string()),
        icon: Some("jira.png".to_string()),
        bindings: vec![
            AppBinding {
                label: "create".to_string(),
                app_id: Some("jira".to_string()),
                location: Some("/command/jira/create".to_string()),
                description: Some("Create a new ticket".to_string()),
                call: Some(AppCall::new("/jira/create")),
                form: embed_create_form.then(create_form),
                ..Default::default()
            },
            AppBinding {
                label: "comment".to_string(),
                app_id: Some("jira".to_string()),
                description: Some("Comment on a ticket".to_string()),
                call: Some(AppCall::new("/jira/comment")),
                form: Some(comment_form()),
                ..Default::default()
            },
            AppBinding {
                label: "subscribe".to_string(),
                app_id: Some("jira".to_string()),
                call: Some(AppCall::new("/jira/subscribe")),
                form: Some(subscribe_form()),
                ..Default::default()
            },
        ],
        ..Default::default()
    }]
}

pub fn workspace_data() -> WorkspaceData {
    let mut data = WorkspaceData {
        bindings: jira_bindings(false),
        users: vec![
            UserProfile {
                id: "u1".to_string(),
                username: "alice".to_string(),
                first_name: Some("Alice".to_string()),
                last_name: Some("Liddell".to_string()),
                ..Default::default()
            },
            UserProfile {
                id: "u2".to_string(),
                username: "bob".to_string(),
                ..Default::default()
            },
        ],
        channels: vec![
            Channel {
                id: "c1".to_string(),
                name: "town-square".to_string(),
                display_name: "Town Square".to_string(),
                team_id: Some(TEAM_ID.to_string()),
            },
            Channel {
                id: "c2".to_string(),
                name: "off-topic".to_string(),
                display_name: "Off-Topic".to_string(),
                team_id: Some(TEAM_ID.to_string()),
            },
        ],
        cached_users: vec!["u1".to_string()],
        cached_channels: vec!["c1".to_string()],
        ..Default::default()
    };
    data.forms.insert("/jira/create".to_string(), create_form());
    data.lookups.insert(
        "/jira/create".to_string(),
        vec![
            LookupItem {
                label: "Epic One".to_string(),
                value: "epic-1".to_string(),
                icon_data: None,
            },
            LookupItem {
                label: "Epic Two".to_string(),
                value: "epic 2".to_string(),
                icon_data: None,
            },
        ],
    );
    data
}

pub fn workspace() -> Arc<Workspace> {
    Arc::new(Workspace::new(workspace_data()))
}

pub fn parser(workspace: &Arc<Workspace>) -> AppCommandParser {
    AppCommandParser::new(
        ParserServices::from_workspace(workspace.clone()),
        ParserContext::new(CHANNEL_ID, TEAM_ID),
    )
}

/// Run the tokenizer alone against bindings with embedded forms
pub fn parse(command: &str, mode: ParseMode) -> ParsedCommand {
    let mut parsed = ParsedCommand::new(command);
    parsed.match_binding(&jira_bindings(true), mode);
    parsed.parse_form(mode);
    parsed
}

pub fn text_value<'a>(parsed: &'a ParsedCommand, name: &str) -> Option<&'a str> {
    parsed.values.get(name).and_then(CallValue::as_text)
}

pub fn completes(suggestions: &[AutocompleteSuggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.complete.as_str()).collect()
}
