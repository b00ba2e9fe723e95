//! App Command Types
//!
//! Wire and domain types for app command bindings, forms, calls and
//! autocomplete suggestions. Everything that crosses the collaborator
//! boundary is serde-serialisable so it can be loaded from fixtures or sent
//! over HTTP unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of field types understood by the parser
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Bool,
    User,
    Channel,
    StaticSelect,
    DynamicSelect,
    Markdown,
}

/// Option of a select field, also the expanded form of user/channel values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon_data: None,
        }
    }
}

/// Default value declared on a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Bool(bool),
    Text(String),
    Option(SelectOption),
}

impl FieldDefault {
    /// Empty text and `false` count as "no default"
    pub fn is_set(&self) -> bool {
        match self {
            FieldDefault::Bool(value) => *value,
            FieldDefault::Text(text) => !text.is_empty(),
            FieldDefault::Option(option) => !option.value.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldDefault::Text(text) => Some(text),
            FieldDefault::Option(option) => Some(&option.value),
            FieldDefault::Bool(_) => None,
        }
    }

    pub fn as_option(&self) -> Option<&SelectOption> {
        match self {
            FieldDefault::Option(option) => Some(option),
            _ => None,
        }
    }
}

/// Position of the single rest-of-line field
pub const REST_POSITION: i32 = -1;

/// One argument definition of a form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldDefault>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl AppField {
    /// Flag name; fields without a label are addressed by name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_rest(&self) -> bool {
        self.position == Some(REST_POSITION) && self.field_type == FieldType::Text
    }

    /// Markdown and read-only fields never take values from the command line
    pub fn is_user_settable(&self) -> bool {
        self.field_type != FieldType::Markdown && !self.readonly
    }
}

/// Field schema of a leaf binding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<AppField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<AppCall>,
    #[serde(default)]
    pub source_of_truth: bool,
}

impl AppForm {
    /// Fields a command line may fill, in source order
    pub fn settable_fields(&self) -> impl Iterator<Item = &AppField> {
        self.fields.iter().filter(|f| f.is_user_settable())
    }

    /// First settable field declared at `position`, in source order
    pub fn field_at(&self, position: i32) -> Option<&AppField> {
        self.settable_fields().find(|f| f.position == Some(position))
    }

    pub fn rest_field(&self) -> Option<&AppField> {
        self.settable_fields().find(|f| f.is_rest())
    }

    pub fn field_by_label(&self, label: &str) -> Option<&AppField> {
        self.settable_fields()
            .find(|f| crate::core::strings::eq_ignore_case(f.display_label(), label))
    }
}

/// Target of a call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppCall {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
}

impl AppCall {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Node of the command tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppBinding {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<AppBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<AppForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<AppCall>,
}

impl AppBinding {
    pub fn is_leaf(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Value of a field in a call: raw text while parsing, an option once expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallValue {
    Text(String),
    Option(SelectOption),
}

impl CallValue {
    pub fn text(value: impl Into<String>) -> Self {
        CallValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CallValue::Text(text) => Some(text),
            CallValue::Option(_) => None,
        }
    }

    /// Empty text counts as "no value" for required-field checks
    pub fn is_empty(&self) -> bool {
        match self {
            CallValue::Text(text) => text.is_empty(),
            CallValue::Option(option) => option.value.is_empty(),
        }
    }
}

/// Field name to value; ordered so call payloads are deterministic
pub type CallValues = BTreeMap<String, CallValue>;

/// Context sent with every call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Kind of call issued through the dispatcher
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallType {
    Submit,
    Form,
    Lookup,
}

/// Fully composed call ready for the dispatcher
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallRequest {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    pub context: AppContext,
    #[serde(default)]
    pub values: CallValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl CallRequest {
    pub fn new(
        call: &AppCall,
        context: AppContext,
        values: CallValues,
        raw_command: Option<String>,
    ) -> Self {
        Self {
            path: call.path.clone(),
            expand: call.expand.clone(),
            state: call.state.clone(),
            context,
            values,
            raw_command,
            selected_field: None,
            query: None,
        }
    }
}

/// Response types the parser knows how to handle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum CallResponseType {
    Ok,
    Form,
    Navigate,
}

/// Response of the dispatcher
///
/// `type` stays a raw string so unknown types can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallResponse {
    #[serde(rename = "type", default)]
    pub response_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<AppForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_url: Option<String>,
}

impl CallResponse {
    pub fn kind(&self) -> Option<CallResponseType> {
        self.response_type.parse().ok()
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response_type: CallResponseType::Ok.to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_form(form: AppForm) -> Self {
        Self {
            response_type: CallResponseType::Form.to_string(),
            form: Some(form),
            ..Default::default()
        }
    }

    pub fn lookup(items: Vec<LookupItem>) -> Self {
        Self {
            response_type: CallResponseType::Ok.to_string(),
            data: Some(serde_json::json!({ "items": items })),
            ..Default::default()
        }
    }
}

/// One item of a dynamic-select lookup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupData {
    #[serde(default)]
    pub items: Vec<LookupItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Full name if known, else nickname, else username
    pub fn display_name(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        if !full_name.is_empty() {
            return full_name;
        }
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname.to_string(),
            _ => self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// Category of a suggestion, used by renderers to pick a row style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SuggestionKind {
    Command,
    Parameter,
    User,
    Channel,
    Execute,
    Error,
}

/// Record backing a user or channel suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionItem {
    User(UserProfile),
    Channel(Channel),
}

/// Marker appended to the execute suggestion's completion text
pub const EXECUTE_CURRENT_COMMAND_ITEM_ID: &str = "_execute_current_command";

/// Icon marker of error/sentinel suggestions
pub const COMMAND_SUGGESTION_ERROR: &str = "error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteSuggestion {
    pub complete: String,
    pub suggestion: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub icon_data: String,
    pub kind: SuggestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<SuggestionItem>,
}

impl AutocompleteSuggestion {
    pub fn new(
        kind: SuggestionKind,
        complete: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            complete: complete.into(),
            suggestion: suggestion.into(),
            description: String::new(),
            hint: String::new(),
            icon_data: String::new(),
            kind,
            item: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_data = icon.into();
        self
    }

    pub fn with_item(mut self, item: SuggestionItem) -> Self {
        self.item = Some(item);
        self
    }

    pub fn is_execute(&self) -> bool {
        self.kind == SuggestionKind::Execute
            || self.complete.ends_with(EXECUTE_CURRENT_COMMAND_ITEM_ID)
    }
}
