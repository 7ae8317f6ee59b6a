//! Field primitives shared by every template extractor.
//!
//! All functions here are pure and operate on already-normalised lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile;

static EMOJI_TAG: Lazy<Regex> = Lazy::new(|| compile(r"<a?:\w+:\d+>"));
static KEY_PUNCTUATION: Lazy<Regex> = Lazy::new(|| compile(r"[^\w\s-]"));
static KEY_SEPARATORS: Lazy<Regex> = Lazy::new(|| compile(r"[\s\-]+"));
static LABEL_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z0-9 \-]+:"));
static LIST_DELIMITERS: Lazy<Regex> = Lazy::new(|| compile(r"[,/\\\-]+"));
static URL: Lazy<Regex> = Lazy::new(|| compile(r"https?://\S+"));

/// Case-insensitive substring test for a field label.
#[must_use]
pub fn label_present(line: &str, label: &str) -> bool {
    !line.is_empty() && line.to_lowercase().contains(&label.to_lowercase())
}

/// Text after the first colon, trimmed. Empty when the line has no colon.
#[must_use]
pub fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value.trim())
}

/// Drop trailing commas and spaces, then surrounding whitespace.
#[must_use]
pub fn trim_value(value: &str) -> &str {
    value.trim_end_matches([',', ' ']).trim()
}

/// Owned copy of a value, or `None` when it is empty.
#[must_use]
pub fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Remove platform emoji tags (`<:name:id>` and animated `<a:name:id>`).
#[must_use]
pub fn strip_emoji_tags(text: &str) -> String {
    EMOJI_TAG.replace_all(text, "").trim().to_string()
}

/// Canonical snake_case key for a free-form label.
///
/// `"Moon Count (approx.)"` becomes `"moon_count_approx"`.
#[must_use]
pub fn canonical_key(label: &str) -> String {
    let bare = KEY_PUNCTUATION.replace_all(label, "");
    let lower = bare.trim().to_lowercase();
    KEY_SEPARATORS.replace_all(&lower, "_").into_owned()
}

/// Whether a normalised line opens a new `Label:` field.
#[must_use]
pub fn looks_like_label(line: &str) -> bool {
    LABEL_PREFIX.is_match(line)
}

/// Whether a raw line is a `--` section delimiter.
#[must_use]
pub fn is_section_delimiter(raw: &str) -> bool {
    raw.trim_start().starts_with("--")
}

/// Split a list value on commas, slashes and hyphens.
///
/// Emoji tags are stripped from each piece; empty pieces are dropped.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    LIST_DELIMITERS
        .split(value)
        .map(|piece| trim_value(&strip_emoji_tags(piece)).to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Whether a value would be split into a list by [`split_list`].
#[must_use]
pub fn has_list_delimiter(value: &str) -> bool {
    value.contains([',', '/', '-'])
}

/// First `http(s)://` literal in the text.
#[must_use]
pub fn find_url(text: &str) -> Option<&str> {
    URL.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matching_ignores_case() {
        assert!(label_present("SYSTEM NAME: Foo", "System Name"));
        assert!(label_present("the system name is", "system name"));
        assert!(!label_present("", "Name"));
        assert!(!label_present("Planet: Foo", "Name"));
    }

    #[test]
    fn value_after_first_colon() {
        assert_eq!(value_after_colon("Coordinates: 12:34:56"), "12:34:56");
        assert_eq!(value_after_colon("Name:   Foo  "), "Foo");
        assert_eq!(value_after_colon("no colon here"), "");
    }

    #[test]
    fn trims_trailing_commas() {
        assert_eq!(trim_value("Copper, , "), "Copper");
        assert_eq!(trim_value("  Lush  "), "Lush");
        assert_eq!(trim_value(""), "");
    }

    #[test]
    fn strips_emoji_tags() {
        assert_eq!(strip_emoji_tags("<:gek:123456> Gek"), "Gek");
        assert_eq!(strip_emoji_tags("Red <a:spin:42>"), "Red");
        assert_eq!(strip_emoji_tags("<notatag>"), "<notatag>");
    }

    #[test]
    fn canonical_keys() {
        assert_eq!(canonical_key("Moon Count (approx.)"), "moon_count_approx");
        assert_eq!(canonical_key("  Portal - Address "), "portal_address");
        assert_eq!(canonical_key("Terrain"), "terrain");
        assert_eq!(canonical_key("!!"), "");
    }

    #[test]
    fn label_detection() {
        assert!(looks_like_label("Flora Type: Tree"));
        assert!(looks_like_label("Depth-or Location:"));
        assert!(!looks_like_label(":portal1::portal2:"));
        assert!(!looks_like_label("just some text"));
        assert!(!looks_like_label("**Name**: x"));
    }

    #[test]
    fn section_delimiters_use_the_raw_line() {
        assert!(is_section_delimiter("-- Screenshot"));
        assert!(is_section_delimiter("   ----"));
        assert!(!is_section_delimiter("- Screenshot"));
    }

    #[test]
    fn list_hygiene() {
        assert_eq!(split_list("Iron, // Cobalt -  "), vec!["Iron", "Cobalt"]);
        assert_eq!(
            split_list("<:cu:1> Copper / Gold\\Silver"),
            vec!["Copper", "Gold", "Silver"]
        );
        assert!(split_list(" , / - ").is_empty());
        assert!(split_list("<:only:1>").is_empty());
    }

    #[test]
    fn finds_urls() {
        assert_eq!(
            find_url("see https://cdn.example.com/a.png now"),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(find_url("no link"), None);
    }
}
