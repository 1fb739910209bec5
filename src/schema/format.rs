//! Format checks applied to a single non-empty field value.

use regex::Regex;
use std::sync::OnceLock;

/// Shape a field value must have.
#[derive(Debug, Clone)]
pub enum Format {
    /// Any non-blank text.
    NonEmpty,
    /// At least this many characters.
    MinChars(usize),
    /// An absolute URL.
    Url,
    /// A syntactically valid email address.
    Email,
    /// Full match against a compiled pattern.
    Pattern(Regex),
    /// One of a fixed set of values, compared exactly.
    OneOf(Vec<String>),
}

impl Format {
    /// Check a value against the format. Emptiness is decided by the rule, not here.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Format::NonEmpty => !value.trim().is_empty(),
            Format::MinChars(min) => value.chars().count() >= *min,
            Format::Url => is_valid_url(value),
            Format::Email => is_valid_email(value),
            Format::Pattern(pattern) => pattern.is_match(value),
            Format::OneOf(allowed) => allowed.iter().any(|a| a == value),
        }
    }
}

/// Compile a pattern anchored at both ends. One leading `^` and one unescaped
/// trailing `$` are dropped before wrapping.
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    let body = match body.strip_suffix('$') {
        Some(rest) if !ends_with_escape(rest) => rest,
        _ => body,
    };
    Regex::new(&format!("^(?:{})$", body))
}

fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn is_valid_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok()
}

const EMAIL_PATTERN: &str =
    r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@(?:[a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Constant pattern, covered by test_email_pattern_compiles
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.contains("..") {
        return false;
    }
    email_pattern().is_match(value)
}
