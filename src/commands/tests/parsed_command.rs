use super::helpers::*;
use crate::commands::api::*;

fn execute(command: &str) -> ParsedCommand {
    parse(command, ParseMode::Execute)
}

fn autocomplete(command: &str) -> ParsedCommand {
    parse(command, ParseMode::Autocomplete)
}

#[test]
fn test_command_must_start_with_slash() {
    let parsed = execute("jira create P");
    assert!(parsed.is_error());
    assert_eq!(parsed.error, Some(ParseError::NoSlashStart));
}

#[test]
fn test_empty_bindings_fail() {
    let mut parsed = ParsedCommand::new("/jira");
    parsed.match_binding(&[], ParseMode::Execute);
    assert_eq!(parsed.error, Some(ParseError::NoBindings));
}

#[test]
fn test_no_match_reports_first_word() {
    let parsed = execute("/nothing here");
    assert_eq!(
        parsed.error,
        Some(ParseError::NoMatch {
            command: "/nothing".to_string()
        })
    );
}

#[test]
fn test_non_leaf_cannot_execute() {
    let parsed = execute("/jira");
    assert_eq!(parsed.error, Some(ParseError::ExecuteNonLeaf));
    let parsed = autocomplete("/jira ");
    assert!(!parsed.is_error());
}

#[test]
fn test_binding_match_is_case_insensitive() {
    let parsed = execute("/JIRA Create P");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(parsed.location, "/jira/create");
    assert_eq!(text_value(&parsed, "project"), Some("P"));
}

#[test]
fn test_positional_and_bare_boolean() {
    let parsed = execute("/jira create MYPROJ --silent");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(parsed.values.len(), 2);
    assert_eq!(text_value(&parsed, "project"), Some("MYPROJ"));
    assert_eq!(text_value(&parsed, "silent"), Some("true"));
}

#[test]
fn test_explicit_boolean_value() {
    let parsed = execute("/jira create P --silent false");
    assert_eq!(text_value(&parsed, "silent"), Some("false"));
}

#[test]
fn test_boolean_rollback_reparses_next_token() {
    let parsed = execute("/jira create --silent MYPROJ");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "silent"), Some("true"));
    assert_eq!(text_value(&parsed, "project"), Some("MYPROJ"));
}

#[test]
fn test_flag_order_does_not_matter() {
    let a = execute("/jira create P --summary hi --silent");
    let b = execute("/jira create --silent --summary hi P");
    assert!(!a.is_error() && !b.is_error());
    assert_eq!(a.values, b.values);
}

#[test]
fn test_quoted_and_ticked_values() {
    let parsed = execute(r#"/jira create P --summary "hello world" --epic `a "b" c`"#);
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "summary"), Some("hello world"));
    assert_eq!(text_value(&parsed, "epic"), Some(r#"a "b" c"#));
}

#[test]
fn test_escaped_delimiter_stays_in_value() {
    let parsed = execute(r#"/jira create P --summary "say \"hi\"""#);
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "summary"), Some(r#"say "hi""#));
}

#[test]
fn test_empty_quoted_value_is_rejected() {
    let parsed = execute(r#"/jira create P --summary """#);
    assert_eq!(parsed.error, Some(ParseError::EmptyValue));
}

#[test]
fn test_unterminated_quote() {
    let parsed = execute(r#"/jira create P --summary "hello"#);
    assert_eq!(parsed.error, Some(ParseError::MissingClosingQuote));
    let parsed = execute("/jira create P --summary `hello");
    assert_eq!(parsed.error, Some(ParseError::MissingClosingTick));
}

#[test]
fn test_autocomplete_keeps_unterminated_quote_incomplete() {
    let parsed = autocomplete(r#"/jira create P --summary "hel"#);
    assert!(!parsed.is_error());
    assert_eq!(parsed.state, ParseState::QuotedValue);
    assert_eq!(parsed.incomplete, "hel");
    assert_eq!(parsed.field.as_ref().map(|f| f.name.as_str()), Some("summary"));
}

#[test]
fn test_equals_sign_separates_flag_value() {
    let parsed = execute("/jira create P --summary=hi");
    assert_eq!(text_value(&parsed, "summary"), Some("hi"));

    let parsed = execute("/jira create P --summary==hi");
    assert_eq!(parsed.error, Some(ParseError::MultipleEqualSigns));
}

#[test]
fn test_unknown_flag() {
    let parsed = execute("/jira create --nope");
    assert_eq!(
        parsed.error,
        Some(ParseError::UnexpectedFlag {
            flag: "nope".to_string()
        })
    );
    assert_eq!(parsed.i, 19);
}

#[test]
fn test_em_dash_starts_a_flag() {
    let parsed = execute("/jira create P \u{2014}summary hi");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "summary"), Some("hi"));
}

#[test]
fn test_single_dash_flag() {
    let parsed = execute("/jira create P -summary hi");
    assert_eq!(text_value(&parsed, "summary"), Some("hi"));
}

#[test]
fn test_extra_positional_is_rejected() {
    let parsed = execute("/jira create P Q");
    assert_eq!(parsed.error, Some(ParseError::NoArgumentAtPosition));
}

#[test]
fn test_markdown_field_takes_no_positional() {
    let parsed = execute("/jira subscribe MYPROJ");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "project"), Some("MYPROJ"));
    assert!(!parsed.values.contains_key("about"));
}

#[test]
fn test_readonly_and_markdown_fields_reject_flags() {
    for flag in ["owner", "about"] {
        let parsed = execute(&format!("/jira subscribe --{flag} bob"));
        assert_eq!(
            parsed.error,
            Some(ParseError::UnexpectedFlag {
                flag: flag.to_string()
            })
        );
        assert!(!parsed.values.contains_key(flag));
    }
}

#[test]
fn test_rest_field_is_filled_once() {
    let parsed = execute("/jira comment PROJ-1 --message hi extra words");
    assert_eq!(parsed.error, Some(ParseError::NoArgumentAtPosition));
    assert_eq!(text_value(&parsed, "message"), Some("hi"));
}

#[test]
fn test_rest_field_takes_remaining_text_verbatim() {
    let parsed = execute("/jira comment PROJ-1 this is   \"a\" --comment");
    assert!(!parsed.is_error(), "{:?}", parsed.error);
    assert_eq!(text_value(&parsed, "issue"), Some("PROJ-1"));
    assert_eq!(
        text_value(&parsed, "message"),
        Some("this is   \"a\" --comment")
    );
}

#[test]
fn test_rest_field_is_not_stored_while_typing() {
    let parsed = autocomplete("/jira comment PROJ-1 still typ");
    assert_eq!(parsed.state, ParseState::Rest);
    assert_eq!(parsed.incomplete, "still typ");
    assert!(!parsed.values.contains_key("message"));
}

#[test]
fn test_autocomplete_stops_inside_command() {
    let parsed = autocomplete("/jira cre");
    assert_eq!(parsed.state, ParseState::Command);
    assert_eq!(parsed.incomplete, "cre");
    assert_eq!(parsed.incomplete_start, 6);
    assert_eq!(parsed.binding.as_ref().map(|b| b.label.as_str()), Some("jira"));
    assert!(parsed.form.is_none());
}

#[test]
fn test_autocomplete_partial_flag() {
    let parsed = autocomplete("/jira create P --sum");
    assert_eq!(parsed.state, ParseState::Flag);
    assert_eq!(parsed.incomplete, "sum");
}

#[test]
fn test_autocomplete_boolean_prefix_is_kept_as_value() {
    let parsed = autocomplete("/jira create P --silent tr");
    assert_eq!(parsed.state, ParseState::EndValue);
    assert_eq!(parsed.incomplete, "tr");
    assert!(!parsed.values.contains_key("silent"));
}

#[test]
fn test_leaf_without_form_needs_form() {
    let mut parsed = ParsedCommand::new("/jira create P");
    parsed.match_binding(&jira_bindings(false), ParseMode::Execute);
    assert!(parsed.needs_form());
    parsed.parse_form(ParseMode::Execute);
    assert!(parsed.values.is_empty());
}

#[test]
fn test_multibyte_offsets_are_characters() {
    let parsed = execute("/jira create P --summary \u{e9}t\u{e9} --nope");
    assert_eq!(text_value(&parsed, "summary"), Some("\u{e9}t\u{e9}"));
    assert_eq!(parsed.i, parsed.len());
    assert!(parsed.is_error());
}
