//! Small string helpers shared by the parser and the CLI

use unicode_segmentation::UnicodeSegmentation;

pub fn title_case(s: &str) -> String {
    s.split_word_bounds()
        .map(|w| {
            let mut g = w.graphemes(true);
            match g.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), g.as_str().to_lowercase()),
                None => String::new(),
            }
        })
        .collect()
}

/// Case-insensitive equality used for command labels and flag names
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive prefix test used when filtering suggestions
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// True when a value would be split by the tokenizer unless delimited
pub fn is_multiword(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}
