use std::sync::LazyLock;

use regex::Regex;

use super::text::clean_text;

// Month name (abbreviated or full), day with optional ordinal, 4-digit year.
// Numeric dates like 4/10/2025 are not recognized.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[\s,.\-]+\d{1,2}(?:st|nd|rd|th)?[\s,.\-]+\d{4}\b",
    )
    .unwrap()
});

const EDGE_SEPARATORS: &[char] = &[' ', '-', '–', ','];

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| EDGE_SEPARATORS.contains(&c) || c.is_whitespace())
}

/// Pull the first month-led date out of `text`.
///
/// Returns `(title, date)`. The title is the text before the date; when the
/// date leads, it is the text after it. `date` is empty when nothing matched.
pub fn split_date(text: &str) -> (String, String) {
    let text = clean_text(text);
    let Some(m) = DATE_RE.find(&text) else {
        return (text, String::new());
    };

    let date = trim_separators(m.as_str()).to_string();
    let before = trim_separators(&text[..m.start()]);
    let after = trim_separators(&text[m.end()..]);
    let title = if before.is_empty() { after } else { before };

    (title.to_string(), date)
}
