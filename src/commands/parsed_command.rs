//! Command line tokenizer
//!
//! `ParsedCommand` is the mutable state of one parse. It walks the input one
//! character at a time through an explicit finite state machine, first
//! descending the binding tree ([`ParsedCommand::match_binding`]) and then,
//! once the leaf's form is known, filling field values
//! ([`ParsedCommand::parse_form`]).
//!
//! The same transition table serves two modes. In execution mode the input
//! must be complete and well formed. In autocomplete mode running out of
//! input in any state simply stops the parse, leaving the token being typed
//! in `incomplete` so suggestions can be offered for it.
//!
//! A parse never panics on bad input: every failure moves the machine to
//! [`ParseState::Error`] and records a [`ParseError`].

use crate::commands::error::ParseError;
use crate::commands::types::{AppBinding, AppField, AppForm, CallValue, CallValues, FieldType};
use crate::core::strings::eq_ignore_case;

/// Typed on iOS when autocorrect merges `--`
pub const EM_DASH: char = '\u{2014}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ParseState {
    Start,
    Command,
    EndCommand,
    CommandSeparator,
    StartParameter,
    ParameterSeparator,
    Flag1,
    Flag,
    FlagValueSeparator,
    StartValue,
    NonspaceValue,
    QuotedValue,
    TickValue,
    EndValue,
    EndQuotedValue,
    EndTickedValue,
    Error,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Complete command submitted by the user
    Execute,
    /// Text typed so far, up to the cursor
    Autocomplete,
}

impl ParseMode {
    pub fn is_autocomplete(self) -> bool {
        self == ParseMode::Autocomplete
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[derive(Debug, Clone)]
pub struct ParsedCommand {
    input: Vec<char>,
    /// Raw command line as given
    pub command: String,
    /// Cursor, in characters
    pub i: usize,
    pub state: ParseState,
    /// Deepest binding matched so far
    pub binding: Option<AppBinding>,
    pub form: Option<AppForm>,
    /// Field whose value is being parsed
    pub field: Option<AppField>,
    pub values: CallValues,
    pub incomplete: String,
    /// Character offset where `incomplete` begins
    pub incomplete_start: usize,
    /// Number of positional arguments seen
    pub position: i32,
    /// `/label/label...` path of the matched bindings
    pub location: String,
    pub error: Option<ParseError>,
}

impl ParsedCommand {
    pub fn new(command: &str) -> Self {
        Self {
            input: command.chars().collect(),
            command: command.to_string(),
            i: 0,
            state: ParseState::Start,
            binding: None,
            form: None,
            field: None,
            values: CallValues::new(),
            incomplete: String::new(),
            incomplete_start: 0,
            position: 0,
            location: String::new(),
            error: None,
        }
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.input.get(index).copied()
    }

    /// Input length in characters
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The first `end` characters of the input
    pub fn prefix(&self, end: usize) -> String {
        self.input[..end.min(self.input.len())].iter().collect()
    }

    pub fn is_error(&self) -> bool {
        self.state == ParseState::Error
    }

    /// True when the field already carries a non-empty value
    pub fn has_value(&self, field_name: &str) -> bool {
        self.values
            .get(field_name)
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    }

    /// A leaf binding was matched but its form must be fetched
    pub fn needs_form(&self) -> bool {
        !self.is_error()
            && self.form.is_none()
            && self.binding.as_ref().map(AppBinding::is_leaf).unwrap_or(false)
    }

    pub fn fail(&mut self, error: ParseError) {
        log::debug!(
            "Parse of '{}' failed at offset {} in state {}: {}",
            self.command,
            self.i,
            self.state,
            error
        );
        self.error = Some(error);
        self.state = ParseState::Error;
    }

    /// Descend the binding tree along the command path
    ///
    /// Stops at the first word that does not name a child of the current
    /// binding; that word becomes the start of the parameters. A matched leaf
    /// takes its embedded form, if any; otherwise [`needs_form`] reports that
    /// the form has to be resolved before [`parse_form`] can run.
    ///
    /// [`needs_form`]: ParsedCommand::needs_form
    /// [`parse_form`]: ParsedCommand::parse_form
    pub fn match_binding(&mut self, command_bindings: &[AppBinding], mode: ParseMode) {
        if command_bindings.is_empty() {
            return self.fail(ParseError::NoBindings);
        }

        let mut candidates = command_bindings;
        loop {
            let c = self.char_at(self.i);
            match self.state {
                ParseState::Start => {
                    if c != Some('/') {
                        return self.fail(ParseError::NoSlashStart);
                    }
                    self.i += 1;
                    self.incomplete.clear();
                    self.incomplete_start = self.i;
                    self.state = ParseState::Command;
                }

                ParseState::Command => match c {
                    None if mode.is_autocomplete() => break,
                    None => self.state = ParseState::EndCommand,
                    Some(ch) if is_blank(ch) => self.state = ParseState::EndCommand,
                    Some(ch) => {
                        self.incomplete.push(ch);
                        self.i += 1;
                    }
                },

                ParseState::EndCommand => {
                    let Some(binding) = candidates
                        .iter()
                        .find(|b| eq_ignore_case(&b.label, &self.incomplete))
                    else {
                        break;
                    };
                    log::trace!("Matched binding '{}'", binding.label);
                    self.location.push('/');
                    self.location.push_str(&binding.label);
                    self.binding = Some(binding.clone());
                    candidates = &binding.bindings;
                    self.state = ParseState::CommandSeparator;
                }

                ParseState::CommandSeparator => match c {
                    Some(ch) if is_blank(ch) => self.i += 1,
                    _ => {
                        self.incomplete.clear();
                        self.incomplete_start = self.i;
                        self.state = ParseState::Command;
                        if c.is_none() {
                            break;
                        }
                    }
                },

                other => {
                    return self.fail(ParseError::UnexpectedState {
                        state: other.to_string(),
                    })
                }
            }
        }

        let Some(binding) = self.binding.as_ref() else {
            if !mode.is_autocomplete() {
                let command = self
                    .command
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                self.fail(ParseError::NoMatch { command });
            }
            return;
        };

        let is_leaf = binding.is_leaf();
        let embedded_form = binding.form.clone();
        if !mode.is_autocomplete() && !is_leaf {
            return self.fail(ParseError::ExecuteNonLeaf);
        }
        if is_leaf {
            self.form = embedded_form;
        }
    }

    /// Parse flags and positional values against the resolved form
    ///
    /// No-op when the parse already failed or no form is known. Parsing
    /// restarts at `incomplete_start`, the first character not consumed by
    /// the command path.
    pub fn parse_form(&mut self, mode: ParseMode) {
        if self.is_error() {
            return;
        }
        let Some(form) = self.form.clone() else {
            return;
        };

        let autocomplete = mode.is_autocomplete();
        self.state = ParseState::StartParameter;
        self.i = self.incomplete_start;
        let mut flag_equals_used = false;
        let mut escaped = false;
        // Rollback point for boolean flags
        let mut value_start = self.i;

        loop {
            let c = self.char_at(self.i);
            match self.state {
                ParseState::StartParameter => match c {
                    None => return,
                    Some('-') => {
                        self.state = ParseState::Flag1;
                        self.i += 1;
                    }
                    Some(EM_DASH) => {
                        self.state = ParseState::Flag;
                        self.i += 1;
                        self.incomplete.clear();
                        self.incomplete_start = self.i;
                        flag_equals_used = false;
                    }
                    Some(_) => {
                        self.position += 1;
                        if let Some(field) = form.field_at(self.position) {
                            self.field = Some(field.clone());
                            self.state = ParseState::StartValue;
                        } else {
                            match form.rest_field() {
                                Some(field) if !self.has_value(&field.name) => {
                                    self.incomplete_start = self.i;
                                    self.incomplete.clear();
                                    self.field = Some(field.clone());
                                    self.state = ParseState::Rest;
                                }
                                _ => return self.fail(ParseError::NoArgumentAtPosition),
                            }
                        }
                    }
                },

                ParseState::Rest => {
                    let Some(field) = self.field.as_ref() else {
                        return self.fail(ParseError::MissingFieldValue);
                    };
                    match c {
                        None => {
                            if !autocomplete {
                                self.values
                                    .insert(field.name.clone(), CallValue::text(self.incomplete.clone()));
                            }
                            return;
                        }
                        Some(ch) => {
                            self.incomplete.push(ch);
                            self.i += 1;
                        }
                    }
                }

                ParseState::ParameterSeparator => {
                    self.incomplete_start = self.i;
                    match c {
                        None => {
                            self.state = ParseState::StartParameter;
                            return;
                        }
                        Some(ch) if is_blank(ch) => self.i += 1,
                        Some(_) => self.state = ParseState::StartParameter,
                    }
                }

                ParseState::Flag1 => {
                    if c == Some('-') {
                        self.i += 1;
                    }
                    self.state = ParseState::Flag;
                    self.incomplete.clear();
                    self.incomplete_start = self.i;
                    flag_equals_used = false;
                }

                ParseState::Flag => match c {
                    None if autocomplete => return,
                    None | Some(' ') | Some('\t') | Some('=') => {
                        let Some(field) = form.field_by_label(&self.incomplete) else {
                            let flag = self.incomplete.clone();
                            return self.fail(ParseError::UnexpectedFlag { flag });
                        };
                        self.field = Some(field.clone());
                        self.incomplete.clear();
                        self.state = ParseState::FlagValueSeparator;
                    }
                    Some(ch) => {
                        self.incomplete.push(ch);
                        self.i += 1;
                    }
                },

                ParseState::FlagValueSeparator => {
                    self.incomplete_start = self.i;
                    match c {
                        None if autocomplete => return,
                        None => self.state = ParseState::StartValue,
                        Some(ch) if is_blank(ch) => self.i += 1,
                        Some('=') => {
                            if flag_equals_used {
                                return self.fail(ParseError::MultipleEqualSigns);
                            }
                            flag_equals_used = true;
                            self.i += 1;
                        }
                        Some(_) => self.state = ParseState::StartValue,
                    }
                }

                ParseState::StartValue => {
                    self.incomplete.clear();
                    self.incomplete_start = self.i;
                    value_start = self.i;
                    match c {
                        Some('"') => {
                            self.state = ParseState::QuotedValue;
                            self.i += 1;
                        }
                        Some('`') => {
                            self.state = ParseState::TickValue;
                            self.i += 1;
                        }
                        Some(ch) if is_blank(ch) => {
                            return self.fail(ParseError::UnexpectedWhitespace)
                        }
                        _ => self.state = ParseState::NonspaceValue,
                    }
                }

                ParseState::NonspaceValue => match c {
                    Some(ch) if !is_blank(ch) => {
                        self.incomplete.push(ch);
                        self.i += 1;
                    }
                    _ => self.state = ParseState::EndValue,
                },

                ParseState::QuotedValue | ParseState::TickValue => {
                    let (delimiter, closed_state, unterminated) =
                        if self.state == ParseState::QuotedValue {
                            ('"', ParseState::EndQuotedValue, ParseError::MissingClosingQuote)
                        } else {
                            ('`', ParseState::EndTickedValue, ParseError::MissingClosingTick)
                        };
                    match c {
                        None if autocomplete => return,
                        None => return self.fail(unterminated),
                        // Escapes are taken literally; `\n` stays `n`
                        Some(ch) if escaped => {
                            self.incomplete.push(ch);
                            self.i += 1;
                            escaped = false;
                        }
                        Some(ch) if ch == delimiter => {
                            if self.incomplete_start + 1 == self.i {
                                return self.fail(ParseError::EmptyValue);
                            }
                            self.i += 1;
                            self.state = closed_state;
                        }
                        Some('\\') => {
                            escaped = true;
                            self.i += 1;
                        }
                        Some(ch) => {
                            self.incomplete.push(ch);
                            self.i += 1;
                        }
                    }
                }

                ParseState::EndValue | ParseState::EndQuotedValue | ParseState::EndTickedValue => {
                    let Some(field) = self.field.clone() else {
                        return self.fail(ParseError::MissingFieldValue);
                    };

                    if field.field_type == FieldType::Bool && !self.is_boolean_token(autocomplete) {
                        // `--flag next-thing`: the flag is a bare boolean, rewind
                        // and read the token again as the next parameter
                        log::trace!(
                            "Bare boolean flag '{}', rewinding to offset {}",
                            field.name,
                            value_start
                        );
                        self.i = value_start;
                        self.values.insert(field.name, CallValue::text("true"));
                        self.state = ParseState::StartParameter;
                        continue;
                    }

                    if autocomplete && c.is_none() {
                        return;
                    }
                    let value = std::mem::take(&mut self.incomplete);
                    self.values.insert(field.name, CallValue::Text(value));
                    self.incomplete_start = self.i;
                    if c.is_none() {
                        return;
                    }
                    self.state = ParseState::ParameterSeparator;
                }

                other => {
                    return self.fail(ParseError::UnexpectedState {
                        state: other.to_string(),
                    })
                }
            }
        }
    }

    fn is_boolean_token(&self, autocomplete: bool) -> bool {
        if autocomplete {
            "true".starts_with(self.incomplete.as_str())
                || "false".starts_with(self.incomplete.as_str())
        } else {
            self.incomplete == "true" || self.incomplete == "false"
        }
    }
}
