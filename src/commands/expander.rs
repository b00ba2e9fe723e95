//! Value expansion
//!
//! After a successful parse the raw text values are completed and checked
//! before a call is built:
//!
//! 1. [`add_default_and_read_only_values`] fills in form defaults
//! 2. [`missing_fields`] reports required fields still without a value
//! 3. [`expand_options`] turns user, channel and select text into options
//!
//! Expansion looks users and channels up through the directories, so it is
//! async; independent fields are expanded concurrently.

use crate::commands::context::{ParserContext, ParserServices};
use crate::commands::intl::{messages, MessageDescriptor};
use crate::commands::parsed_command::ParsedCommand;
use crate::commands::traits::{channel_by_id, channel_by_name, user_by_id, user_by_username};
use crate::commands::types::{AppField, AppForm, CallValue, CallValues, FieldType, SelectOption};
use futures::stream::{self, StreamExt};

pub const DEFAULT_MAX_CONCURRENT_EXPANSIONS: usize = 4;

/// Apply field defaults to fields that are read-only or were not supplied
///
/// A user or channel default that cannot be resolved is skipped.
pub async fn add_default_and_read_only_values(services: &ParserServices, parsed: &mut ParsedCommand) {
    let Some(form) = parsed.form.clone() else {
        return;
    };

    for field in &form.fields {
        let Some(default) = field.value.as_ref().filter(|value| value.is_set()) else {
            continue;
        };
        if !field.readonly && parsed.values.contains_key(&field.name) {
            continue;
        }

        let value = match field.field_type {
            FieldType::Text => default.as_text().map(str::to_string),
            FieldType::Bool => Some("true".to_string()),
            FieldType::User => {
                let Some(user_id) = default.as_text() else {
                    continue;
                };
                match user_by_id(services.users.as_ref(), user_id).await {
                    Ok(user) => Some(user.username),
                    Err(e) => {
                        log::warn!("Skipping default for field '{}': {}", field.name, e);
                        None
                    }
                }
            }
            FieldType::Channel => {
                let Some(channel_id) = default.as_text() else {
                    continue;
                };
                match channel_by_id(services.channels.as_ref(), channel_id).await {
                    Ok(channel) => Some(channel.name),
                    Err(e) => {
                        log::warn!("Skipping default for field '{}': {}", field.name, e);
                        None
                    }
                }
            }
            FieldType::StaticSelect | FieldType::DynamicSelect => {
                default.as_option().map(|option| option.value.clone())
            }
            FieldType::Markdown => None,
        };

        if let Some(value) = value {
            log::trace!("Default '{}' = '{}'", field.name, value);
            parsed.values.insert(field.name.clone(), CallValue::Text(value));
        }
    }
}

/// Required fields without a non-empty value, in form order
pub fn missing_fields(parsed: &ParsedCommand) -> Vec<&AppField> {
    let Some(form) = parsed.form.as_ref() else {
        return Vec::new();
    };
    form.fields
        .iter()
        .filter(|field| field.is_required && !parsed.has_value(&field.name))
        .collect()
}

/// Replace raw text with options for user, channel and select fields
///
/// All fields are expanded, at most `max_concurrent` at a time, and every
/// failure is reported; errors are joined with newlines in form order.
pub async fn expand_options(
    services: &ParserServices,
    context: &ParserContext,
    form: &AppForm,
    values: &mut CallValues,
    max_concurrent: usize,
) -> Result<(), String> {
    let pending: Vec<(&AppField, String)> = form
        .fields
        .iter()
        .filter_map(|field| {
            let raw = values.get(&field.name)?.as_text()?;
            (!raw.is_empty()).then(|| (field, raw.to_string()))
        })
        .collect();

    let results: Vec<(String, Result<Option<CallValue>, String>)> = stream::iter(pending)
        .map(|(field, raw)| async move {
            let expanded = expand_field(services, context, field, &raw).await;
            (field.name.clone(), expanded)
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let mut errors = Vec::new();
    for (name, result) in results {
        match result {
            Ok(Some(value)) => {
                values.insert(name, value);
            }
            Ok(None) => {}
            Err(message) => errors.push(message),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

async fn expand_field(
    services: &ParserServices,
    context: &ParserContext,
    field: &AppField,
    raw: &str,
) -> Result<Option<CallValue>, String> {
    let unknown = |descriptor: &MessageDescriptor| {
        services.formatter.format(
            descriptor,
            &[("fieldName", field.name.as_str()), ("option", raw)],
        )
    };

    match field.field_type {
        FieldType::DynamicSelect => Ok(Some(CallValue::Option(SelectOption::new("", raw)))),

        FieldType::StaticSelect => field
            .options
            .iter()
            .find(|option| option.value == raw)
            .map(|option| Some(CallValue::Option(option.clone())))
            .ok_or_else(|| unknown(&messages::UNKNOWN_OPTION)),

        FieldType::User => {
            let username = raw.strip_prefix('@').unwrap_or(raw);
            match user_by_username(services.users.as_ref(), username).await {
                Ok(user) => Ok(Some(CallValue::Option(SelectOption::new(
                    user.username,
                    user.id,
                )))),
                Err(e) => {
                    log::debug!("User lookup for '{}' failed: {}", username, e);
                    Err(unknown(&messages::UNKNOWN_USER))
                }
            }
        }

        FieldType::Channel => {
            let name = raw.strip_prefix('~').unwrap_or(raw);
            match channel_by_name(services.channels.as_ref(), &context.team_id, name).await {
                Ok(channel) => Ok(Some(CallValue::Option(SelectOption::new(
                    channel.display_name,
                    channel.id,
                )))),
                Err(e) => {
                    log::debug!("Channel lookup for '{}' failed: {}", name, e);
                    Err(unknown(&messages::UNKNOWN_CHANNEL))
                }
            }
        }

        FieldType::Text | FieldType::Bool | FieldType::Markdown => Ok(None),
    }
}
