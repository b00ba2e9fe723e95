//! Localised messages
//!
//! Every user-visible string of the parser is a [`MessageDescriptor`]: a
//! stable id plus an English default template with `{name}` placeholders.
//! A [`MessageFormatter`] turns a descriptor and its values into text.
//! [`DefaultFormatter`] renders the defaults; [`CatalogFormatter`] looks the
//! id up in a locale catalogue first.

use crate::commands::error::{CommandError, CommandResult};
use crate::commands::traits::MessageFormatter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub id: &'static str,
    pub default_message: &'static str,
}

const fn msg(id: &'static str, default_message: &'static str) -> MessageDescriptor {
    MessageDescriptor {
        id,
        default_message,
    }
}

pub mod messages {
    use super::{msg, MessageDescriptor};

    pub const NO_SLASH_START: MessageDescriptor = msg(
        "apps.error.parser.no_slash_start",
        "Command must start with a `/`.",
    );
    pub const NO_BINDINGS: MessageDescriptor =
        msg("apps.error.parser.no_bindings", "No command bindings.");
    pub const NO_MATCH: MessageDescriptor = msg(
        "apps.error.parser.no_match",
        "`{command}`: No matching command found in this workspace.",
    );
    pub const EXECUTE_NON_LEAF: MessageDescriptor = msg(
        "apps.error.parser.execute_non_leaf",
        "You must select a subcommand.",
    );
    pub const UNEXPECTED_STATE: MessageDescriptor = msg(
        "apps.error.parser.unexpected_state",
        "Unreachable: Unexpected state in matchBinding: `{state}`.",
    );
    pub const NO_ARGUMENT_POS_X: MessageDescriptor = msg(
        "apps.error.parser.no_argument_pos_x",
        "Unable to identify argument.",
    );
    pub const MISSING_FIELD_VALUE: MessageDescriptor = msg(
        "apps.error.parser.missing_field_value",
        "Field value is missing.",
    );
    pub const UNEXPECTED_FLAG: MessageDescriptor = msg(
        "apps.error.parser.unexpected_flag",
        "Command does not accept flag `{flagName}`.",
    );
    pub const MULTIPLE_EQUAL: MessageDescriptor = msg(
        "apps.error.parser.multiple_equal",
        "Multiple `=` signs are not allowed.",
    );
    pub const UNEXPECTED_WHITESPACE: MessageDescriptor = msg(
        "apps.error.parser.unexpected_whitespace",
        "Unreachable: Unexpected whitespace.",
    );
    pub const MISSING_QUOTE: MessageDescriptor = msg(
        "apps.error.parser.missing_quote",
        "Matching double quote expected before end of input.",
    );
    pub const MISSING_TICK: MessageDescriptor = msg(
        "apps.error.parser.missing_tick",
        "Matching tick quote expected before end of input.",
    );
    pub const EMPTY_VALUE: MessageDescriptor = msg(
        "apps.error.parser.empty_value",
        "Empty values are not allowed.",
    );
    pub const PARSER_ERROR: MessageDescriptor = msg(
        "apps.error.parser",
        "Parsing error: {error}\n```\n{command}\n{space}^\n```",
    );
    pub const MISSING_BINDING: MessageDescriptor = msg(
        "apps.error.parser.missing_binding",
        "Missing command bindings.",
    );
    pub const MISSING_CALL: MessageDescriptor =
        msg("apps.error.parser.missing_call", "Missing binding call.");
    pub const UNEXPECTED_ERROR: MessageDescriptor =
        msg("apps.error.parser.unexpected_error", "Unexpected error.");
    pub const FIELD_MISSING: MessageDescriptor = msg(
        "apps.error.command.field_missing",
        "Required fields missing: `{fieldName}`.",
    );
    pub const UNKNOWN_OPTION: MessageDescriptor = msg(
        "apps.error.command.unknown_option",
        "Unknown option for field `{fieldName}`: `{option}`.",
    );
    pub const UNKNOWN_USER: MessageDescriptor = msg(
        "apps.error.command.unknown_user",
        "Unknown user for field `{fieldName}`: `{option}`.",
    );
    pub const UNKNOWN_CHANNEL: MessageDescriptor = msg(
        "apps.error.command.unknown_channel",
        "Unknown channel for field `{fieldName}`: `{option}`.",
    );
    pub const RESPONSE_UNEXPECTED_TYPE: MessageDescriptor = msg(
        "apps.error.responses.unexpected_type",
        "App response type was not expected. Response type: {type}.",
    );
    pub const RESPONSE_UNKNOWN_TYPE: MessageDescriptor = msg(
        "apps.error.responses.unknown_type",
        "App response type not supported. Response type: {type}.",
    );
    pub const UNKNOWN_ERROR: MessageDescriptor = msg("apps.error.unknown", "Unknown error.");
    pub const LOOKUP_PREPARE: MessageDescriptor = msg(
        "apps.error.lookup.error_preparing_request",
        "Error preparing lookup request: {errorMessage}",
    );
    pub const GENERIC_ERROR: MessageDescriptor = msg("apps.error", "Error: {error}");

    pub const SUGGESTION_PARSER_ERROR: MessageDescriptor =
        msg("apps.suggestion.errors.parser_error", "Parsing error");
    pub const SUGGESTION_NONE: MessageDescriptor =
        msg("apps.suggestion.no_suggestion", "No matching suggestions.");
    pub const SUGGESTION_NO_STATIC: MessageDescriptor =
        msg("apps.suggestion.no_static", "No matching options.");
    pub const SUGGESTION_NO_DYNAMIC: MessageDescriptor = msg(
        "apps.suggestion.no_dynamic",
        "No data was returned for dynamic suggestions",
    );
    pub const SUGGESTION_DYNAMIC_ERROR: MessageDescriptor =
        msg("apps.suggestion.dynamic.error", "Dynamic select error");
    pub const SUGGESTION_EXECUTE: MessageDescriptor =
        msg("apps.suggestion.execute", "Execute Current Command");
    pub const SUGGESTION_EXECUTE_DESCRIPTION: MessageDescriptor = msg(
        "apps.suggestion.execute.description",
        "Select this option or use {key} to execute the current command.",
    );
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

/// Replace `{name}` placeholders; unknown placeholders are left untouched
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Renders the English default templates
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl MessageFormatter for DefaultFormatter {
    fn format(&self, descriptor: &MessageDescriptor, values: &[(&str, &str)]) -> String {
        interpolate(descriptor.default_message, values)
    }
}

/// Locale catalogue keyed by message id, falling back to the defaults
#[derive(Debug, Default, Clone)]
pub struct CatalogFormatter {
    locale: String,
    catalog: HashMap<String, String>,
}

impl CatalogFormatter {
    pub fn new(locale: impl Into<String>, catalog: HashMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            catalog,
        }
    }

    /// Load a flat JSON object of `id -> template`; the file stem is the locale
    pub fn from_file(path: &Path) -> CommandResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CommandError::Catalog {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;
        let catalog: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| CommandError::Catalog {
                path: path.display().to_string(),
                cause: e.to_string(),
            })?;
        let locale = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        log::debug!(
            "Loaded {} catalogue entries for locale '{}'",
            catalog.len(),
            locale
        );
        Ok(Self::new(locale, catalog))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl MessageFormatter for CatalogFormatter {
    fn format(&self, descriptor: &MessageDescriptor, values: &[(&str, &str)]) -> String {
        let template = self
            .catalog
            .get(descriptor.id)
            .map(String::as_str)
            .unwrap_or(descriptor.default_message);
        interpolate(template, values)
    }
}
