//! Autocomplete suggestions
//!
//! The suggestion half of [`AppCommandParser`]. The text typed so far is
//! parsed in autocomplete mode and the state the machine stops in decides
//! what is offered:
//!
//! | state                                  | suggestions                         |
//! |----------------------------------------|-------------------------------------|
//! | `Command`                              | sub-commands of the matched binding |
//! | `StartParameter`                       | next positional value, else flags   |
//! | `Flag`                                 | flag names                          |
//! | `FlagValueSeparator`, `*Value`         | values for the current field        |
//! | `Rest`                                 | execute, then values                |
//!
//! Every suggestion's `complete` is then rewritten to the full command line
//! it would produce, except the execute suggestion which already is one.

use crate::commands::expander::missing_fields;
use crate::commands::intl::messages;
use crate::commands::parsed_command::{ParseMode, ParseState, ParsedCommand, EM_DASH};
use crate::commands::parser::AppCommandParser;
use crate::commands::types::{
    AppBinding, AppField, AutocompleteSuggestion, CallResponseType, CallType, Channel, FieldType,
    LookupData, SuggestionItem, SuggestionKind, UserProfile, COMMAND_SUGGESTION_ERROR,
    EXECUTE_CURRENT_COMMAND_ITEM_ID,
};
use crate::core::strings::{is_multiword, starts_with_ignore_case};

/// Key binding named in the execute suggestion
pub const EXECUTE_KEY: &str = "Ctrl + Enter";

/// States in which the command could be submitted as typed
const EXECUTABLE_STATES: [ParseState; 5] = [
    ParseState::EndCommand,
    ParseState::CommandSeparator,
    ParseState::StartParameter,
    ParseState::ParameterSeparator,
    ParseState::EndValue,
];

fn sentinel(hint: String, description: String) -> AutocompleteSuggestion {
    AutocompleteSuggestion::new(SuggestionKind::Error, "", "")
        .with_hint(hint)
        .with_description(description)
        .with_icon(COMMAND_SUGGESTION_ERROR)
}

fn user_suggestion(user: UserProfile) -> AutocompleteSuggestion {
    let mention = format!("@{}", user.username);
    AutocompleteSuggestion::new(SuggestionKind::User, mention.clone(), mention)
        .with_description(user.display_name())
        .with_item(SuggestionItem::User(user))
}

fn channel_suggestion(channel: Channel) -> AutocompleteSuggestion {
    let mention = format!("~{}", channel.name);
    AutocompleteSuggestion::new(SuggestionKind::Channel, mention.clone(), mention)
        .with_description(channel.display_name.clone())
        .with_item(SuggestionItem::Channel(channel))
}

/// Wrap a completion in the active delimiter, or in ticks when it has spaces
fn quote_value(value: &str, delimiter: Option<char>) -> String {
    match delimiter {
        Some(d) => format!("{d}{value}{d}"),
        None if is_multiword(value) => format!("`{value}`"),
        None => value.to_string(),
    }
}

fn binding_icon(parsed: &ParsedCommand) -> String {
    parsed
        .binding
        .as_ref()
        .and_then(|binding| binding.icon.clone())
        .unwrap_or_default()
}

impl AppCommandParser {
    /// Suggestions for `pretext`, the command line up to the cursor
    pub async fn get_suggestions(&self, pretext: &str) -> Vec<AutocompleteSuggestion> {
        if !pretext.starts_with('/') {
            return Vec::new();
        }
        let bindings = self.command_bindings();
        if bindings.is_empty() {
            return Vec::new();
        }

        let mut parsed = ParsedCommand::new(pretext);
        self.match_binding(&mut parsed, &bindings, ParseMode::Autocomplete)
            .await;
        if parsed.is_error() {
            return vec![self.error_suggestion(&parsed)];
        }

        let mut suggestions = Vec::new();
        if parsed.state == ParseState::Command {
            suggestions = self.command_suggestions(&parsed, &bindings);
        }

        if parsed.form.is_some() || !parsed.incomplete.is_empty() {
            parsed.parse_form(ParseMode::Autocomplete);
            if parsed.is_error() {
                return vec![self.error_suggestion(&parsed)];
            }
            let parameters = self.parameter_suggestions(&mut parsed).await;
            suggestions.extend(parameters);
        }

        if EXECUTABLE_STATES.contains(&parsed.state) && self.is_executable(&parsed) {
            suggestions.insert(0, self.execute_suggestion(&parsed));
        } else if suggestions.is_empty()
            && !matches!(
                parsed.field.as_ref().map(|field| field.field_type),
                Some(FieldType::User) | Some(FieldType::Channel)
            )
        {
            suggestions.push(sentinel(
                self.formatter().format(&messages::SUGGESTION_NONE, &[]),
                String::new(),
            ));
        }

        log::debug!(
            "{} suggestion(s) for '{}' in state {}",
            suggestions.len(),
            pretext,
            parsed.state
        );
        suggestions
            .into_iter()
            .map(|suggestion| decorate_complete(&parsed, suggestion))
            .collect()
    }

    fn is_executable(&self, parsed: &ParsedCommand) -> bool {
        let has_call = parsed
            .form
            .as_ref()
            .and_then(|form| form.call.as_ref())
            .or_else(|| parsed.binding.as_ref().and_then(|b| b.call.as_ref()))
            .is_some();
        let has_value = parsed.state != ParseState::EndValue
            || parsed
                .field
                .as_ref()
                .map(|field| parsed.values.contains_key(&field.name))
                .unwrap_or(false);
        has_call && has_value && missing_fields(parsed).is_empty()
    }

    pub fn execute_suggestion(&self, parsed: &ParsedCommand) -> AutocompleteSuggestion {
        AutocompleteSuggestion::new(
            SuggestionKind::Execute,
            format!("{}{}", parsed.command, EXECUTE_CURRENT_COMMAND_ITEM_ID),
            self.formatter().format(&messages::SUGGESTION_EXECUTE, &[]),
        )
        .with_description(
            self.formatter()
                .format(&messages::SUGGESTION_EXECUTE_DESCRIPTION, &[("key", EXECUTE_KEY)]),
        )
        .with_icon(EXECUTE_CURRENT_COMMAND_ITEM_ID)
    }

    /// Leaves the buffer unchanged when picked
    fn error_suggestion(&self, parsed: &ParsedCommand) -> AutocompleteSuggestion {
        let description = parsed
            .error
            .as_ref()
            .map(|error| error.localize(self.formatter()))
            .unwrap_or_default();
        AutocompleteSuggestion::new(SuggestionKind::Error, parsed.command.clone(), "")
            .with_hint(self.formatter().format(&messages::SUGGESTION_PARSER_ERROR, &[]))
            .with_description(description)
            .with_icon(COMMAND_SUGGESTION_ERROR)
    }

    fn command_suggestions(
        &self,
        parsed: &ParsedCommand,
        root: &[AppBinding],
    ) -> Vec<AutocompleteSuggestion> {
        let candidates = match parsed.binding.as_ref() {
            Some(binding) => binding.bindings.as_slice(),
            None => root,
        };
        candidates
            .iter()
            .filter(|binding| starts_with_ignore_case(&binding.label, &parsed.incomplete))
            .map(|binding| {
                AutocompleteSuggestion::new(
                    SuggestionKind::Command,
                    binding.label.clone(),
                    binding.label.clone(),
                )
                .with_description(binding.description.clone().unwrap_or_default())
                .with_hint(binding.hint.clone().unwrap_or_default())
                .with_icon(binding.icon.clone().unwrap_or_default())
            })
            .collect()
    }

    async fn parameter_suggestions(&self, parsed: &mut ParsedCommand) -> Vec<AutocompleteSuggestion> {
        match parsed.state {
            ParseState::StartParameter => {
                let positional = parsed
                    .form
                    .as_ref()
                    .and_then(|form| form.field_at(parsed.position + 1))
                    .cloned();
                match positional {
                    Some(field) => {
                        parsed.field = Some(field);
                        self.value_suggestions(parsed, None).await
                    }
                    None => self.flag_name_suggestions(parsed),
                }
            }
            ParseState::Flag => self.flag_name_suggestions(parsed),
            ParseState::EndValue | ParseState::FlagValueSeparator | ParseState::NonspaceValue => {
                self.value_suggestions(parsed, None).await
            }
            ParseState::QuotedValue | ParseState::EndQuotedValue => {
                self.value_suggestions(parsed, Some('"')).await
            }
            ParseState::TickValue | ParseState::EndTickedValue => {
                self.value_suggestions(parsed, Some('`')).await
            }
            ParseState::Rest => {
                let mut suggestions = Vec::new();
                if self.is_rest_executable(parsed) {
                    suggestions.push(self.execute_suggestion(parsed));
                }
                suggestions.extend(self.value_suggestions(parsed, None).await);
                suggestions
            }
            _ => Vec::new(),
        }
    }

    /// The rest field is not committed until the command is submitted
    fn is_rest_executable(&self, parsed: &ParsedCommand) -> bool {
        let rest_name = parsed.field.as_ref().map(|field| field.name.as_str());
        let has_call = parsed
            .form
            .as_ref()
            .and_then(|form| form.call.as_ref())
            .or_else(|| parsed.binding.as_ref().and_then(|b| b.call.as_ref()))
            .is_some();
        has_call
            && missing_fields(parsed)
                .iter()
                .all(|field| Some(field.name.as_str()) == rest_name)
    }

    fn flag_name_suggestions(&self, parsed: &ParsedCommand) -> Vec<AutocompleteSuggestion> {
        let Some(form) = parsed.form.as_ref() else {
            return Vec::new();
        };

        // Zero, one or two dashes were typed before the token
        let start = parsed.incomplete_start;
        let dashes = (1..=2)
            .take_while(|back| start > *back && parsed.char_at(start - back) == Some('-'))
            .count();
        let prefix = if start > 0 && parsed.char_at(start - 1) == Some(EM_DASH) {
            ""
        } else {
            &"--"[dashes..]
        };

        let icon = binding_icon(parsed);
        form.settable_fields()
            .filter(|field| {
                starts_with_ignore_case(field.display_label(), &parsed.incomplete)
                    && !parsed.has_value(&field.name)
            })
            .map(|field| {
                AutocompleteSuggestion::new(
                    SuggestionKind::Parameter,
                    format!("{}{}", prefix, field.display_label()),
                    format!("--{}", field.display_label()),
                )
                .with_description(field.description.clone().unwrap_or_default())
                .with_hint(field.hint.clone().unwrap_or_default())
                .with_icon(icon.clone())
            })
            .collect()
    }

    async fn value_suggestions(
        &self,
        parsed: &ParsedCommand,
        delimiter: Option<char>,
    ) -> Vec<AutocompleteSuggestion> {
        let Some(field) = parsed.field.as_ref() else {
            return Vec::new();
        };

        match field.field_type {
            FieldType::User => self.user_suggestions(&parsed.incomplete).await,
            FieldType::Channel => self.channel_suggestions(&parsed.incomplete).await,
            FieldType::Bool => boolean_suggestions(&parsed.incomplete),
            FieldType::DynamicSelect => {
                self.dynamic_select_suggestions(parsed, field, delimiter)
                    .await
            }
            FieldType::StaticSelect => self.static_select_suggestions(parsed, field, delimiter),
            FieldType::Text | FieldType::Markdown => {
                if let Some(mentions) = self
                    .mention_suggestions(&parsed.incomplete, delimiter)
                    .await
                {
                    return mentions;
                }
                let complete = match delimiter {
                    Some(d) if !parsed.incomplete.is_empty() => {
                        format!("{d}{}{d}", parsed.incomplete)
                    }
                    _ => parsed.incomplete.clone(),
                };
                vec![AutocompleteSuggestion::new(
                    SuggestionKind::Parameter,
                    complete,
                    parsed.incomplete.clone(),
                )
                .with_description(field.description.clone().unwrap_or_default())
                .with_hint(field.hint.clone().unwrap_or_default())
                .with_icon(binding_icon(parsed))]
            }
        }
    }

    async fn user_suggestions(&self, incomplete: &str) -> Vec<AutocompleteSuggestion> {
        let term = incomplete.trim();
        let term = term.strip_prefix('@').unwrap_or(term);
        let context = self.context();
        match self
            .services()
            .users
            .autocomplete(term, &context.team_id, &context.channel_id)
            .await
        {
            Ok(users) => users.into_iter().map(user_suggestion).collect(),
            Err(e) => {
                log::warn!("User autocomplete for '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }

    async fn channel_suggestions(&self, incomplete: &str) -> Vec<AutocompleteSuggestion> {
        let term = incomplete.trim();
        let term = term.strip_prefix('~').unwrap_or(term);
        match self
            .services()
            .channels
            .autocomplete(&self.context().team_id, term)
            .await
        {
            Ok(channels) => channels.into_iter().map(channel_suggestion).collect(),
            Err(e) => {
                log::warn!("Channel autocomplete for '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }

    /// `@user` or `~channel` as the last word of a free-text value
    async fn mention_suggestions(
        &self,
        incomplete: &str,
        delimiter: Option<char>,
    ) -> Option<Vec<AutocompleteSuggestion>> {
        let (head, last_word) = match incomplete.rsplit_once(' ') {
            Some((head, last)) => (head, last),
            None => ("", incomplete),
        };

        let mentions = if last_word.starts_with('@') {
            self.user_suggestions(last_word).await
        } else if last_word.starts_with('~') && !last_word.starts_with("~~") {
            self.channel_suggestions(last_word).await
        } else {
            return None;
        };

        Some(
            mentions
                .into_iter()
                .map(|mut suggestion| {
                    let mut complete = if head.is_empty() {
                        suggestion.complete.clone()
                    } else {
                        format!("{} {}", head, suggestion.complete)
                    };
                    if let Some(d) = delimiter {
                        complete = format!("{d}{complete}{d}");
                    }
                    suggestion.complete = complete;
                    suggestion
                })
                .collect(),
        )
    }

    fn static_select_suggestions(
        &self,
        parsed: &ParsedCommand,
        field: &AppField,
        delimiter: Option<char>,
    ) -> Vec<AutocompleteSuggestion> {
        let icon = binding_icon(parsed);
        let options: Vec<AutocompleteSuggestion> = field
            .options
            .iter()
            .filter(|option| starts_with_ignore_case(&option.label, &parsed.incomplete))
            .map(|option| {
                AutocompleteSuggestion::new(
                    SuggestionKind::Parameter,
                    quote_value(&option.value, delimiter),
                    option.label.clone(),
                )
                .with_description(field.description.clone().unwrap_or_default())
                .with_hint(field.hint.clone().unwrap_or_default())
                .with_icon(option.icon_data.clone().unwrap_or_else(|| icon.clone()))
            })
            .collect();

        if options.is_empty() {
            return vec![sentinel(
                self.formatter().format(&messages::SUGGESTION_NO_STATIC, &[]),
                String::new(),
            )];
        }
        options
    }

    async fn dynamic_select_suggestions(
        &self,
        parsed: &ParsedCommand,
        field: &AppField,
        delimiter: Option<char>,
    ) -> Vec<AutocompleteSuggestion> {
        let mut request = match self.compose_call_from_parsed(parsed).await.into_result() {
            Ok(request) => request,
            Err(e) => {
                let message = self.formatter().format(
                    &messages::LOOKUP_PREPARE,
                    &[("errorMessage", e.to_string().as_str())],
                );
                return vec![self.dynamic_select_error(&message)];
            }
        };
        request.selected_field = Some(field.name.clone());
        request.query = Some(parsed.incomplete.clone());

        let response = match self
            .services()
            .dispatcher
            .perform_call(&request, CallType::Lookup)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let message = e
                    .text
                    .unwrap_or_else(|| self.formatter().format(&messages::UNKNOWN_ERROR, &[]));
                return vec![self.dynamic_select_error(&message)];
            }
        };

        let descriptor = match response.kind() {
            Some(CallResponseType::Ok) => None,
            Some(CallResponseType::Form) | Some(CallResponseType::Navigate) => {
                Some(&messages::RESPONSE_UNEXPECTED_TYPE)
            }
            None => Some(&messages::RESPONSE_UNKNOWN_TYPE),
        };
        if let Some(descriptor) = descriptor {
            let message = self
                .formatter()
                .format(descriptor, &[("type", response.response_type.as_str())]);
            return vec![self.dynamic_select_error(&message)];
        }

        let items = response
            .data
            .and_then(|data| serde_json::from_value::<LookupData>(data).ok())
            .map(|data| data.items)
            .unwrap_or_default();
        if items.is_empty() {
            return vec![sentinel(
                self.formatter().format(&messages::SUGGESTION_NO_DYNAMIC, &[]),
                String::new(),
            )];
        }

        let icon = binding_icon(parsed);
        items
            .into_iter()
            .map(|item| {
                let description = if item.label.is_empty() {
                    item.value.clone()
                } else {
                    item.label.clone()
                };
                AutocompleteSuggestion::new(
                    SuggestionKind::Parameter,
                    quote_value(&item.value, delimiter),
                    item.value.clone(),
                )
                .with_description(description)
                .with_icon(item.icon_data.unwrap_or_else(|| icon.clone()))
            })
            .collect()
    }

    fn dynamic_select_error(&self, message: &str) -> AutocompleteSuggestion {
        sentinel(
            self.formatter().format(&messages::SUGGESTION_DYNAMIC_ERROR, &[]),
            self.formatter()
                .format(&messages::GENERIC_ERROR, &[("error", message)]),
        )
    }
}

fn boolean_suggestions(incomplete: &str) -> Vec<AutocompleteSuggestion> {
    ["true", "false"]
        .iter()
        .filter(|value| value.starts_with(incomplete))
        .map(|value| AutocompleteSuggestion::new(SuggestionKind::Parameter, *value, *value))
        .collect()
}

/// Splice a suggestion's completion into the command typed so far
fn decorate_complete(
    parsed: &ParsedCommand,
    mut suggestion: AutocompleteSuggestion,
) -> AutocompleteSuggestion {
    if suggestion.complete.ends_with(EXECUTE_CURRENT_COMMAND_ITEM_ID) {
        return suggestion;
    }
    // An empty completion also drops the space before it
    let start = parsed.incomplete_start;
    let back = usize::from(
        suggestion.complete.is_empty()
            && start > 0
            && matches!(parsed.char_at(start - 1), Some(' ' | '\t')),
    );
    let head = parsed.prefix(start - back);
    suggestion.complete = format!("{}{}", head, suggestion.complete);
    suggestion
}
