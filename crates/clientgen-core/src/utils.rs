//! String transformation utilities for code generation

use once_cell::sync::Lazy;
use regex::Regex;

/// Convert a string to snake_case
///
/// Every character that is not alphanumeric acts as a word separator.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            // Word boundary on a lower -> upper transition
            if prev_is_lowercase {
                result.push('_');
            }
            result.push(lower_char(ch));
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase();
        } else {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    // First convert to snake_case to normalize the input
    let snake = to_snake_case(s);

    // Then split on underscores and capitalize each word
    snake
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => format!("{}{}", upper_char(first), chars.as_str()),
            }
        })
        .collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let upper_camel = to_upper_camel_case(s);

    let mut chars = upper_camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => format!("{}{}", lower_char(first), chars.as_str()),
    }
}

/// Upper-case mapping of `ch` when it is a single character, else `ch` itself
///
/// Mappings that expand (`ß` to `SS`) would change word boundaries on a second
/// pass, so those characters are left alone.
fn upper_char(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(upper), None) => upper,
        _ => ch,
    }
}

fn lower_char(ch: char) -> char {
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(lower), None) => lower,
        _ => ch,
    }
}

/// Sanitize a string to be safe for use as a filename across all operating systems
/// Replaces any non-alphanumeric characters with underscores
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Whether `name` can be written as a bare TypeScript identifier
pub fn is_ts_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a double-quoted TypeScript string literal
pub fn escape_ts_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Quote a property key when it is not a valid identifier
pub fn quote_if_needed(name: &str) -> String {
    if is_ts_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_ts_string(name))
    }
}

static SMART_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u2018\u2019\u201C\u201D\u2014]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Flatten free text from the document into a single line that is safe inside a
/// `/* ... */` or `/** ... */` comment.
pub fn sanitize_comment(input: &str) -> String {
    let plain = SMART_PUNCTUATION.replace_all(input, |caps: &regex::Captures<'_>| {
        match &caps[0] {
            "\u{2018}" | "\u{2019}" => "'",
            "\u{201C}" | "\u{201D}" => "\"",
            _ => "-",
        }
    });
    WHITESPACE
        .replace_all(plain.trim(), " ")
        .replace("*/", "* /")
}
