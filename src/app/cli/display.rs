//! Terminal rendering of suggestions and call results

use crate::commands::api::{AutocompleteSuggestion, CallRequest, CallResponse, SuggestionKind};
use colored::Colorize;

/// One line per suggestion: completion, then display text, hint and description
pub fn format_suggestion(suggestion: &AutocompleteSuggestion, use_color: bool) -> String {
    let mut parts = vec![suggestion.complete.clone()];
    for extra in [&suggestion.suggestion, &suggestion.hint, &suggestion.description] {
        if !extra.is_empty() {
            parts.push(extra.clone());
        }
    }

    if !use_color {
        return parts.join("  ");
    }

    let head = match suggestion.kind {
        SuggestionKind::Execute => parts[0].green().bold(),
        SuggestionKind::Error => parts[0].red(),
        SuggestionKind::User | SuggestionKind::Channel => parts[0].cyan(),
        SuggestionKind::Command | SuggestionKind::Parameter => parts[0].bold(),
    };
    let tail = parts[1..].join("  ");
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{}  {}", head, tail.dimmed())
    }
}

pub fn print_suggestions(suggestions: &[AutocompleteSuggestion], use_color: bool) {
    if suggestions.is_empty() {
        eprintln!("No suggestions.");
        return;
    }
    for suggestion in suggestions {
        println!("{}", format_suggestion(suggestion, use_color));
    }
}

pub fn format_call(call: &CallRequest) -> Result<String, String> {
    serde_json::to_string_pretty(call).map_err(|e| format!("Failed to serialise call: {}", e))
}

/// Response text, else its type
pub fn format_response(response: &CallResponse) -> String {
    match response.text.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => match response.navigate_to_url.as_deref() {
            Some(url) => format!("{}: {}", response.response_type, url),
            None => response.response_type.clone(),
        },
    }
}
