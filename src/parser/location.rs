use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const UNKNOWN: &str = "Unknown";
pub const VIRTUAL: &str = "Virtual";

const VIRTUAL_MARKERS: &[&str] = &["virtual", "online", "remote"];
const UNKNOWN_MARKERS: &[&str] = &["tbd", "n/a", "not available", "unknown"];

static SEPARATOR_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());
static WASHINGTON_DC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwashington\s+d\.?\s?c\b\.?").unwrap());
static DC_DOTTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bd\.c\b\.?").unwrap());
// Two-letter codes that title-casing turns into "Ny", "Tx", ... Codes that are
// also common words or name prefixes (In, Or, Me, La, Mt, De, Al, On) are left out.
static REGION_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ak|az|ar|ca|co|ct|dc|fl|ga|ia|il|ks|ky|ma|md|mi|mn|mo|ms|nc|nd|ne|nh|nj|nm|nv|ny|pa|ri|sc|sd|tn|tx|ut|va|vt|wa|wi|wv|wy|ab|bc|mb|nb|nl|ns|pe|qc|sk|usa)\b",
    )
    .unwrap()
});

/// Map a free-text location onto `Virtual`, `Unknown` or a title-cased place name.
pub fn normalize_location(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }

    let lower = trimmed.to_lowercase();
    if VIRTUAL_MARKERS.iter().any(|m| lower.contains(m)) {
        return VIRTUAL.to_string();
    }
    if UNKNOWN_MARKERS.iter().any(|m| lower.contains(m)) {
        return UNKNOWN.to_string();
    }

    let collapsed = SEPARATOR_RUN_RE.replace_all(trimmed, " ");
    let titled = title_case(collapsed.trim());
    fix_abbreviations(&titled)
}

/// Upper-case a letter that follows a non-letter, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

fn fix_abbreviations(s: &str) -> String {
    let s = WASHINGTON_DC_RE.replace_all(s, "Washington, DC");
    let s = DC_DOTTED_RE.replace_all(&s, "DC");
    REGION_CODE_RE
        .replace_all(&s, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unknown() {
        assert_eq!(normalize_location(""), "Unknown");
        assert_eq!(normalize_location("   "), "Unknown");
    }

    #[test]
    fn virtual_markers() {
        assert_eq!(normalize_location("Remote / Zoom"), "Virtual");
        assert_eq!(normalize_location("ONLINE via Teams"), "Virtual");
        assert_eq!(normalize_location("Virtual"), "Virtual");
    }

    #[test]
    fn unknown_markers() {
        assert_eq!(normalize_location("TBD"), "Unknown");
        assert_eq!(normalize_location("Venue: N/A"), "Unknown");
        assert_eq!(normalize_location("not available yet"), "Unknown");
    }

    #[test]
    fn washington_dc() {
        assert_eq!(normalize_location("washington d.c."), "Washington, DC");
        assert_eq!(normalize_location("WASHINGTON, DC"), "Washington, DC");
    }

    #[test]
    fn state_codes_restored() {
        assert_eq!(normalize_location("austin, tx"), "Austin TX");
        assert_eq!(normalize_location("New York,  NY"), "New York NY");
        assert_eq!(normalize_location("san francisco ca"), "San Francisco CA");
        assert_eq!(normalize_location("Vancouver, bc"), "Vancouver BC");
    }

    #[test]
    fn codes_only_as_whole_tokens() {
        assert_eq!(normalize_location("CALGARY"), "Calgary");
        assert_eq!(normalize_location("la jolla"), "La Jolla");
    }

    #[test]
    fn title_case_after_punctuation() {
        assert_eq!(title_case("o'hare-area"), "O'Hare-Area");
    }

    #[test]
    fn idempotent() {
        for raw in [
            "washington d.c.",
            "austin, tx",
            "",
            "Remote",
            "minneapolis,   mn",
            "Unspecified",
            "st. paul",
        ] {
            let once = normalize_location(raw);
            assert_eq!(normalize_location(&once), once, "{raw:?}");
        }
    }
}
