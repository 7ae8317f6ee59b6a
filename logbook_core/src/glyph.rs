//! Portal glyph decoding.
//!
//! Players write portal addresses as sixteen glyph tokens (`portal0` ..
//! `portalf`), either bare, as `:portalX:` emoji shortcodes, or already
//! transcribed to hex. [`decode_glyphs`] accepts all three and never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile;
use crate::fields::trim_value;

/// Glyph token vocabulary and the hex digit each token stands for.
pub const GLYPHS: [(&str, char); 16] = [
    ("portal0", '0'),
    ("portal1", '1'),
    ("portal2", '2'),
    ("portal3", '3'),
    ("portal4", '4'),
    ("portal5", '5'),
    ("portal6", '6'),
    ("portal7", '7'),
    ("portal8", '8'),
    ("portal9", '9'),
    ("portala", 'A'),
    ("portalb", 'B'),
    ("portalc", 'C'),
    ("portald", 'D'),
    ("portale", 'E'),
    ("portalf", 'F'),
];

static TOKEN: Lazy<Regex> = Lazy::new(|| compile(r"(?i)portal[0-9a-f]"));
static WRAPPED_TOKEN: Lazy<Regex> = Lazy::new(|| compile(r"(?i):(portal[0-9a-f]):"));
static HEX_RUN: Lazy<Regex> = Lazy::new(|| compile(r"[0-9A-Fa-f]+"));
static HEX_BLOCK: Lazy<Regex> = Lazy::new(|| compile(r"[0-9A-Fa-f]{6,}"));

fn glyph_digit(token: &str) -> Option<char> {
    GLYPHS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, digit)| digit)
}

/// Convert glyph text into a hexadecimal code string.
///
/// First match wins: bare tokens, then colon-wrapped tokens, then every run
/// of hex digits concatenated. Text with none of those comes back trimmed.
#[must_use]
pub fn decode_glyphs(text: &str) -> String {
    let text = trim_value(text);
    if text.is_empty() {
        return String::new();
    }

    let mut hex: String = TOKEN
        .find_iter(text)
        .filter_map(|m| glyph_digit(m.as_str()))
        .collect();

    if hex.is_empty() {
        hex = WRAPPED_TOKEN
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| glyph_digit(m.as_str()))
            .collect();
    }

    if hex.is_empty() {
        hex = HEX_RUN.find_iter(text).map(|m| m.as_str()).collect();
    }

    if hex.is_empty() {
        text.to_string()
    } else {
        hex
    }
}

/// Whether text plausibly holds a glyph code: a token, a wrapped token or
/// a run of at least six hex digits.
#[must_use]
pub fn looks_like_glyphs(text: &str) -> bool {
    !text.is_empty()
        && (WRAPPED_TOKEN.is_match(text) || TOKEN.is_match(text) || HEX_BLOCK.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bare_tokens_in_order() {
        assert_eq!(decode_glyphs("portal0 portal1 portalA portalf"), "01AF");
        assert_eq!(decode_glyphs("PORTALC,PortalD"), "CD");
    }

    #[test]
    fn decodes_shortcode_tokens() {
        assert_eq!(
            decode_glyphs(":portal1::portal2::portal3:<:portalb:998877>"),
            "123B"
        );
    }

    #[test]
    fn falls_back_to_hex_runs() {
        assert_eq!(decode_glyphs("0123 4567 89AB"), "0123456789AB");
        assert_eq!(decode_glyphs("12-ab"), "12ab");
    }

    #[test]
    fn returns_trimmed_text_when_nothing_decodes() {
        assert_eq!(decode_glyphs("  unknown, "), "unknown");
        assert_eq!(decode_glyphs(""), "");
        assert_eq!(decode_glyphs(" , "), "");
    }

    #[test]
    fn token_output_length_matches_token_count() {
        let text = GLYPHS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(" ");
        let hex = decode_glyphs(&text);
        assert_eq!(hex.len(), GLYPHS.len());
        assert_eq!(hex, "0123456789ABCDEF");
        assert_eq!(decode_glyphs(&hex), hex);
    }

    #[test]
    fn glyph_heuristic() {
        assert!(looks_like_glyphs(":portal3:"));
        assert!(looks_like_glyphs("portal9 portal2"));
        assert!(looks_like_glyphs("code 0A1B2C3D"));
        assert!(!looks_like_glyphs("abc12"));
        assert!(!looks_like_glyphs("Near the galactic core"));
        assert!(!looks_like_glyphs(""));
    }
}
