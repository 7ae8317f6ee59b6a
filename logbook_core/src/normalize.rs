//! Line normalisation.
//!
//! Every line goes through [`normalize`] before any field matching, so the
//! extractors only ever see straight quotes, plain hyphens and single spaces.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile;

static LEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| compile(r"^[\s\-*\x{2022}\x{2023}\x{25E6}\x{2027}\x{2043}]+"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

/// Clean one line of raw text into its canonical form.
///
/// Backticks and zero-width characters are dropped, curly quotes and en/em
/// dashes are mapped to their ASCII forms, leading bullet markers are removed
/// and whitespace runs collapse to a single space. The result is a fixed
/// point: normalising it again returns it unchanged.
#[must_use]
pub fn normalize(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let mapped: String = line
        .chars()
        .filter_map(|c| match c {
            '`' | '\u{200B}'..='\u{200F}' | '\u{FEFF}' => None,
            '\u{201C}' | '\u{201D}' | '\u{201E}' => Some('"'),
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{2013}' | '\u{2014}' => Some('-'),
            other => Some(other),
        })
        .collect();

    let stripped = LEADING_MARKERS.replace(&mapped, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
