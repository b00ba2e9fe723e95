//! App Command Error Types
//!
//! `ParseError` is the tokenizer's terminal error set. `CommandError` covers
//! resolution failures. `CallError` and `DirectoryError` are what the
//! collaborators hand back. All of them render through a
//! [`MessageFormatter`](crate::commands::traits::MessageFormatter) so the
//! text shown to users is localisable.

use crate::commands::intl::{messages, MessageDescriptor};
use crate::commands::traits::MessageFormatter;
use crate::core::error_handling::ContextualError;

/// Terminal errors of a parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Command must start with a `/`.")]
    NoSlashStart,

    #[error("No command bindings.")]
    NoBindings,

    #[error("`{command}`: No matching command found in this workspace.")]
    NoMatch { command: String },

    #[error("You must select a subcommand.")]
    ExecuteNonLeaf,

    #[error("Unreachable: Unexpected state in matchBinding: `{state}`.")]
    UnexpectedState { state: String },

    #[error("Unable to identify argument.")]
    NoArgumentAtPosition,

    #[error("Field value is missing.")]
    MissingFieldValue,

    #[error("Command does not accept flag `{flag}`.")]
    UnexpectedFlag { flag: String },

    #[error("Multiple `=` signs are not allowed.")]
    MultipleEqualSigns,

    #[error("Unreachable: Unexpected whitespace.")]
    UnexpectedWhitespace,

    #[error("Matching double quote expected before end of input.")]
    MissingClosingQuote,

    #[error("Matching tick quote expected before end of input.")]
    MissingClosingTick,

    #[error("Empty values are not allowed.")]
    EmptyValue,

    /// Form resolution failed; the message is already user-facing text
    #[error("{0}")]
    FormFetch(String),
}

impl ParseError {
    /// Render the error through the given formatter
    pub fn localize(&self, formatter: &dyn MessageFormatter) -> String {
        match self {
            ParseError::NoSlashStart => formatter.format(&messages::NO_SLASH_START, &[]),
            ParseError::NoBindings => formatter.format(&messages::NO_BINDINGS, &[]),
            ParseError::NoMatch { command } => {
                formatter.format(&messages::NO_MATCH, &[("command", command.as_str())])
            }
            ParseError::ExecuteNonLeaf => formatter.format(&messages::EXECUTE_NON_LEAF, &[]),
            ParseError::UnexpectedState { state } => {
                formatter.format(&messages::UNEXPECTED_STATE, &[("state", state.as_str())])
            }
            ParseError::NoArgumentAtPosition => {
                formatter.format(&messages::NO_ARGUMENT_POS_X, &[])
            }
            ParseError::MissingFieldValue => formatter.format(&messages::MISSING_FIELD_VALUE, &[]),
            ParseError::UnexpectedFlag { flag } => {
                formatter.format(&messages::UNEXPECTED_FLAG, &[("flagName", flag.as_str())])
            }
            ParseError::MultipleEqualSigns => formatter.format(&messages::MULTIPLE_EQUAL, &[]),
            ParseError::UnexpectedWhitespace => {
                formatter.format(&messages::UNEXPECTED_WHITESPACE, &[])
            }
            ParseError::MissingClosingQuote => formatter.format(&messages::MISSING_QUOTE, &[]),
            ParseError::MissingClosingTick => formatter.format(&messages::MISSING_TICK, &[]),
            ParseError::EmptyValue => formatter.format(&messages::EMPTY_VALUE, &[]),
            ParseError::FormFetch(message) => message.clone(),
        }
    }

    /// Unreachable-branch errors; still reported, never panicked on
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ParseError::UnexpectedState { .. } | ParseError::UnexpectedWhitespace
        )
    }
}

/// Resolution and setup failures outside the tokenizer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Already-rendered message destined for the user
    #[error("{message}")]
    User { message: String },

    #[error("Form cache unavailable: {message}")]
    Cache { message: String },

    #[error("Failed to load message catalogue '{path}': {cause}")]
    Catalog { path: String, cause: String },

    #[error("Failed to load workspace fixture '{path}': {cause}")]
    Fixture { path: String, cause: String },
}

impl CommandError {
    pub fn user(message: impl Into<String>) -> Self {
        CommandError::User {
            message: message.into(),
        }
    }

    pub fn from_descriptor(
        formatter: &dyn MessageFormatter,
        descriptor: &MessageDescriptor,
        values: &[(&str, &str)],
    ) -> Self {
        CommandError::user(formatter.format(descriptor, values))
    }
}

impl ContextualError for CommandError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, CommandError::User { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CommandError::User { message } => Some(message),
            _ => None,
        }
    }
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Failure reported by the call dispatcher
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .text.as_deref().unwrap_or("call failed"))]
pub struct CallError {
    /// Server-provided text, shown to the user when present
    pub text: Option<String>,
}

impl CallError {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn without_text() -> Self {
        Self { text: None }
    }
}

pub type CallResult<T> = std::result::Result<T, CallError>;

/// Failure of a user or channel directory lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Directory request failed: {message}")]
    Request { message: String },
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
