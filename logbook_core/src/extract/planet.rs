//! Planet template.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FieldRule, Scan, Template};
use crate::compile;
use crate::fields::non_empty;
use crate::schema::{ExtraFields, PlanetFields, TemplateKind};

static LEVEL_DASH: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)\s*-\s*(.+)"));
static DIGITS: Lazy<Regex> = Lazy::new(|| compile(r"\d+"));

/// Sentinel level as written: the leading number when there is one,
/// otherwise the text itself.
#[must_use]
pub fn parse_sentinel_level(value: &str) -> Option<String> {
    if let Some(level) = LEVEL_DASH.captures(value).and_then(|caps| caps.get(1)) {
        return Some(level.as_str().to_string());
    }
    DIGITS
        .find(value)
        .map(|m| m.as_str().to_string())
        .or_else(|| non_empty(value))
}

fn apply_glyphs(fields: &mut PlanetFields, scan: &mut Scan<'_>) {
    if let Some(raw) = scan.inline_or_lookahead() {
        fields.set_glyphs(raw);
    }
}

type Rule = FieldRule<PlanetFields>;

const RULES: &[Rule] = &[
    Rule {
        labels: &["Planet Name", "Name"],
        apply: |f, s| f.name = s.text(),
    },
    Rule {
        labels: &["Planet Type", "Type"],
        apply: |f, s| f.kind = s.text(),
    },
    Rule {
        labels: &["Planet Glyphs", "Glyphs"],
        apply: apply_glyphs,
    },
    Rule {
        labels: &["Resources"],
        apply: |f, s| {
            if let Some(resources) = s.list() {
                f.resources = resources;
            }
        },
    },
    Rule {
        labels: &["Weather"],
        apply: |f, s| f.weather = s.text(),
    },
    Rule {
        labels: &["Sentinel Level", "Sentinal Level"],
        apply: |f, s| f.sentinel_level = parse_sentinel_level(s.inline()),
    },
    Rule {
        labels: &["Flora"],
        apply: |f, s| f.flora = s.text(),
    },
    Rule {
        labels: &["Fauna"],
        apply: |f, s| f.fauna = s.text(),
    },
    Rule {
        labels: &["Special Note"],
        apply: |f, s| f.special_note = s.block(),
    },
];

impl Template for PlanetFields {
    const KIND: TemplateKind = TemplateKind::Planet;

    fn rules() -> &'static [FieldRule<Self>] {
        RULES
    }

    fn screenshot_url(&mut self) -> &mut Option<String> {
        &mut self.screenshot_url
    }

    fn extra_fields(&mut self) -> &mut ExtraFields {
        &mut self.extra_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_levels() {
        assert_eq!(parse_sentinel_level("3 - Aggressive").as_deref(), Some("3"));
        assert_eq!(parse_sentinel_level("Level 2").as_deref(), Some("2"));
        assert_eq!(parse_sentinel_level("None").as_deref(), Some("None"));
        assert_eq!(parse_sentinel_level(""), None);
    }
}
