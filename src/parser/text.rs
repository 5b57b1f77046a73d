use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Phrases that mark listing-widget chrome rather than an event.
const BOILERPLATE: &[&str] = &[
    "no events",
    "search",
    "category",
    "there are no",
    "upcoming events",
    "filter",
    "calendar",
    "archives",
];

const MIN_TITLE_CHARS: usize = 6;

/// Trim and collapse whitespace runs (newlines from markup included) to one space.
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RE.replace_all(s.trim(), " ").into_owned()
}

pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    if trimmed.chars().count() < MIN_TITLE_CHARS {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !BOILERPLATE.iter().any(|phrase| lower.contains(phrase))
}
