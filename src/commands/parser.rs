//! App command parser
//!
//! [`AppCommandParser`] is the entry point for app slash commands. It has two
//! operations sharing one tokenizer:
//!
//! - [`compose_call_from_command`](AppCommandParser::compose_call_from_command)
//!   turns a complete command line into a [`CallRequest`] (or a user-facing
//!   error message)
//! - [`get_suggestions`](AppCommandParser::get_suggestions) returns
//!   autocomplete suggestions for the text typed so far
//!
//! The suggestion engine lives in `suggestions.rs` as a second `impl` block.

use crate::commands::context::{app_context, ParserContext, ParserServices};
use crate::commands::error::{CommandError, CommandResult, ParseError};
use crate::commands::expander::{
    add_default_and_read_only_values, expand_options, missing_fields,
    DEFAULT_MAX_CONCURRENT_EXPANSIONS,
};
use crate::commands::intl::messages;
use crate::commands::parsed_command::{ParseMode, ParsedCommand};
use crate::commands::resolver::FormResolver;
use crate::commands::traits::MessageFormatter;
use crate::commands::types::{AppBinding, AppContext, CallRequest, CallResponse, CallType};

/// Outcome of composing a call; exactly one side is set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposeResult {
    pub call: Option<CallRequest>,
    pub error_message: Option<String>,
}

impl ComposeResult {
    pub fn call(call: CallRequest) -> Self {
        Self {
            call: Some(call),
            error_message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            call: None,
            error_message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> CommandResult<CallRequest> {
        match (self.call, self.error_message) {
            (Some(call), None) => Ok(call),
            (_, Some(message)) => Err(CommandError::user(message)),
            (None, None) => Err(CommandError::user(messages::UNEXPECTED_ERROR.default_message)),
        }
    }
}

/// Render a parse error with the command and a caret under the failing offset
///
/// For multi-line commands only the line holding the offset is shown.
pub fn parser_error_message(
    formatter: &dyn MessageFormatter,
    error: &str,
    command: &str,
    offset: usize,
) -> String {
    let last_line = command.matches('\n').count();
    let mut line_start = 0;
    let mut line = command;
    let mut column = offset;
    for (index, text) in command.split('\n').enumerate() {
        let width = text.chars().count();
        if offset <= line_start + width || index == last_line {
            line = text;
            column = offset.saturating_sub(line_start);
            break;
        }
        line_start += width + 1;
    }

    let space = " ".repeat(column);
    formatter.format(
        &messages::PARSER_ERROR,
        &[("error", error), ("command", line), ("space", space.as_str())],
    )
}

pub struct AppCommandParser {
    services: ParserServices,
    context: ParserContext,
    max_concurrent_expansions: usize,
}

impl AppCommandParser {
    pub fn new(services: ParserServices, context: ParserContext) -> Self {
        Self {
            services,
            context,
            max_concurrent_expansions: DEFAULT_MAX_CONCURRENT_EXPANSIONS,
        }
    }

    pub fn with_max_concurrent_expansions(mut self, max: usize) -> Self {
        self.max_concurrent_expansions = max.max(1);
        self
    }

    /// Move the parser to another channel or thread
    pub fn set_context(&mut self, context: ParserContext) {
        log::debug!(
            "Parser context now channel '{}' team '{}' root {:?}",
            context.channel_id,
            context.team_id,
            context.root_id
        );
        self.context = context;
    }

    pub fn context(&self) -> &ParserContext {
        &self.context
    }

    pub fn services(&self) -> &ParserServices {
        &self.services
    }

    pub(crate) fn formatter(&self) -> &dyn MessageFormatter {
        self.services.formatter.as_ref()
    }

    pub(crate) fn command_bindings(&self) -> Vec<AppBinding> {
        self.services
            .bindings
            .command_bindings(self.context.in_thread())
    }

    pub async fn app_context(&self, binding: &AppBinding) -> AppContext {
        app_context(&self.services, &self.context, binding).await
    }

    /// Descend the bindings and resolve the leaf's form
    pub(crate) async fn match_binding(
        &self,
        parsed: &mut ParsedCommand,
        bindings: &[AppBinding],
        mode: ParseMode,
    ) {
        parsed.match_binding(bindings, mode);
        if !parsed.needs_form() {
            return;
        }
        let Some(binding) = parsed.binding.clone() else {
            return;
        };

        let resolver = FormResolver::new(&self.services, &self.context);
        match resolver.resolve(&binding, &parsed.location).await {
            Ok(form) => parsed.form = Some(form),
            Err(e) => parsed.fail(ParseError::FormFetch(e.to_string())),
        }
    }

    /// Parse a complete command line into a call request
    pub async fn compose_call_from_command(&self, command: &str) -> ComposeResult {
        let bindings = self.command_bindings();
        let mut parsed = ParsedCommand::new(command);
        self.match_binding(&mut parsed, &bindings, ParseMode::Execute)
            .await;
        parsed.parse_form(ParseMode::Execute);

        if parsed.is_error() {
            let error = parsed
                .error
                .as_ref()
                .map(|e| e.localize(self.formatter()))
                .unwrap_or_default();
            return ComposeResult::error(parser_error_message(
                self.formatter(),
                &error,
                &parsed.command,
                parsed.i,
            ));
        }

        add_default_and_read_only_values(&self.services, &mut parsed).await;

        let missing = missing_fields(&parsed);
        if !missing.is_empty() {
            let labels = missing
                .iter()
                .map(|field| field.display_label())
                .collect::<Vec<_>>()
                .join(", ");
            return ComposeResult::error(self.formatter().format(
                &messages::FIELD_MISSING,
                &[("fieldName", labels.as_str())],
            ));
        }

        self.compose_call_from_parsed(&parsed).await
    }

    /// Build the call for an already-parsed command
    ///
    /// Values are expanded on a copy; `parsed` is left untouched so the
    /// suggestion engine can reuse it for lookups.
    pub async fn compose_call_from_parsed(&self, parsed: &ParsedCommand) -> ComposeResult {
        let Some(binding) = parsed.binding.as_ref() else {
            return ComposeResult::error(self.formatter().format(&messages::MISSING_BINDING, &[]));
        };
        let call = parsed
            .form
            .as_ref()
            .and_then(|form| form.call.as_ref())
            .or(binding.call.as_ref());
        let Some(call) = call else {
            return ComposeResult::error(self.formatter().format(&messages::MISSING_CALL, &[]));
        };

        let mut values = parsed.values.clone();
        if let Some(form) = parsed.form.as_ref() {
            if let Err(message) = expand_options(
                &self.services,
                &self.context,
                form,
                &mut values,
                self.max_concurrent_expansions,
            )
            .await
            {
                return ComposeResult::error(message);
            }
        }

        let context = self.app_context(binding).await;
        ComposeResult::call(CallRequest::new(
            call,
            context,
            values,
            Some(parsed.command.clone()),
        ))
    }

    /// Compose and submit a command
    pub async fn execute(&self, command: &str) -> CommandResult<CallResponse> {
        let request = self.compose_call_from_command(command).await.into_result()?;
        log::info!("Submitting {} ({} values)", request.path, request.values.len());
        self.services
            .dispatcher
            .perform_call(&request, CallType::Submit)
            .await
            .map_err(|e| match e.text {
                Some(text) => CommandError::user(text),
                None => CommandError::from_descriptor(self.formatter(), &messages::UNKNOWN_ERROR, &[]),
            })
    }
}

impl std::fmt::Debug for AppCommandParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCommandParser")
            .field("context", &self.context)
            .field("max_concurrent_expansions", &self.max_concurrent_expansions)
            .finish()
    }
}
