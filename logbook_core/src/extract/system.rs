//! Star system template.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FieldRule, Scan, Template};
use crate::compile;
use crate::fields::{non_empty, strip_emoji_tags, trim_value};
use crate::glyph::looks_like_glyphs;
use crate::record::RawMessage;
use crate::schema::{Conflict, Economy, ExtraFields, SystemFields, TemplateKind};

static TRAVEL_WORDS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)\b(cannot|only|via|portal|warp|drive)\b"));
static CONFLICT_LEVEL_DASH: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)\s*[-\x{2013}]\s*(.+)"));
static CONFLICT_LEVEL_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)level\s*(\d+)"));
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)$"));
static BODIES_PLUS: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)\s*\+\s*(\d+)"));
static BODIES_PAIR: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+).+?(\d+)"));
static BODIES_SINGLE: Lazy<Regex> = Lazy::new(|| compile(r"^(\d+)"));

/// Region values longer than this many words are treated as notes.
const REGION_MAX_WORDS: usize = 8;

/// Whether a "Region" value reads like a travel caveat rather than a name.
///
/// Best-effort: long values and travel vocabulary both count as caveats.
#[must_use]
pub fn is_travel_note(value: &str) -> bool {
    value.split_whitespace().count() > REGION_MAX_WORDS || TRAVEL_WORDS.is_match(value)
}

/// Split an economy value on `//`, then `/`, then `-`.
#[must_use]
pub fn parse_economy(value: &str) -> Economy {
    let value = strip_emoji_tags(value);
    let split = ["//", "/", "-"]
        .into_iter()
        .find_map(|separator| value.split_once(separator));

    match split {
        Some((kind, status)) => Economy {
            kind: non_empty(trim_value(kind)),
            status: non_empty(trim_value(status)),
        },
        None => Economy {
            kind: non_empty(&value),
            status: None,
        },
    }
}

fn capture_number(caps: &regex::Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Parse a conflict value such as `3 - Active Skirmish` or `Level 2 (minor)`.
#[must_use]
pub fn parse_conflict(value: &str) -> Conflict {
    let value = strip_emoji_tags(value);

    if let Some(caps) = CONFLICT_LEVEL_DASH.captures(&value) {
        return Conflict {
            level: capture_number(&caps, 1),
            status: caps.get(2).and_then(|m| non_empty(trim_value(m.as_str()))),
        };
    }

    if let Some(caps) = CONFLICT_LEVEL_WORD.captures(&value) {
        let before_paren = value.split('(').next().unwrap_or_default();
        return Conflict {
            level: capture_number(&caps, 1),
            status: non_empty(trim_value(before_paren)),
        };
    }

    if let Some(caps) = BARE_NUMBER.captures(&value) {
        return Conflict {
            level: capture_number(&caps, 1),
            status: None,
        };
    }

    Conflict {
        level: None,
        status: non_empty(&value),
    }
}

/// Parse a planet count into `(planets, moons)`.
///
/// `4+2` and `4 planets, 2 moons` give both counts; a lone number means no
/// moons. Values without a leading number give nothing.
#[must_use]
pub fn parse_body_count(value: &str) -> (Option<u32>, Option<u32>) {
    if let Some(caps) = BODIES_PLUS
        .captures(value)
        .or_else(|| BODIES_PAIR.captures(value))
    {
        return (capture_number(&caps, 1), capture_number(&caps, 2));
    }

    BODIES_SINGLE
        .captures(value)
        .map_or((None, None), |caps| (capture_number(&caps, 1), Some(0)))
}

fn apply_region(fields: &mut SystemFields, scan: &mut Scan<'_>) {
    let Some(value) = scan.text() else {
        fields.region = None;
        return;
    };
    if is_travel_note(&value) {
        fields.special_note = Some(value);
    } else {
        fields.region = Some(value);
    }
}

fn apply_code(fields: &mut SystemFields, scan: &mut Scan<'_>) {
    if let Some(raw) = scan.glyph_block() {
        fields.set_code(raw);
    }
}

fn apply_body_count(fields: &mut SystemFields, scan: &mut Scan<'_>) {
    let (planets, moons) = parse_body_count(scan.inline());
    if planets.is_some() {
        fields.planets = planets;
        fields.moons = moons;
    }
}

type Rule = FieldRule<SystemFields>;

const RULES: &[Rule] = &[
    Rule {
        labels: &["System Name"],
        apply: |f, s| f.name = s.text(),
    },
    Rule {
        labels: &["Region"],
        apply: apply_region,
    },
    Rule {
        labels: &["System classification"],
        apply: |f, s| f.classification = s.text(),
    },
    Rule {
        labels: &["Special Note"],
        apply: |f, s| f.special_note = s.block(),
    },
    Rule {
        labels: &["System Code"],
        apply: apply_code,
    },
    Rule {
        labels: &["System Colour", "System Color"],
        apply: |f, s| f.colour = s.text_without_emoji(),
    },
    Rule {
        labels: &["Dominant Lifeform"],
        apply: |f, s| f.lifeform = s.text_without_emoji(),
    },
    Rule {
        labels: &["Economy"],
        apply: |f, s| f.economy = parse_economy(s.inline()),
    },
    Rule {
        labels: &["Conflict"],
        apply: |f, s| f.conflict = parse_conflict(s.inline()),
    },
    Rule {
        labels: &["Number of Planets"],
        apply: apply_body_count,
    },
    Rule {
        labels: &["System Coordinates"],
        apply: |f, s| f.coordinates = s.text(),
    },
];

impl Template for SystemFields {
    const KIND: TemplateKind = TemplateKind::System;

    fn rules() -> &'static [FieldRule<Self>] {
        RULES
    }

    fn screenshot_url(&mut self) -> &mut Option<String> {
        &mut self.screenshot_url
    }

    fn extra_fields(&mut self) -> &mut ExtraFields {
        &mut self.extra_fields
    }

    /// Without a labelled code, accept glyphs written anywhere in the message.
    fn finish(&mut self, message: &RawMessage) {
        if self.code_raw().is_some() {
            return;
        }
        let joined = message.lines().collect::<Vec<_>>().join(" ");
        if looks_like_glyphs(&joined) {
            self.set_code(joined);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economy_separators_in_order() {
        let economy = parse_economy("Trading // Booming");
        assert_eq!(economy.kind.as_deref(), Some("Trading"));
        assert_eq!(economy.status.as_deref(), Some("Booming"));

        let economy = parse_economy("Mining / Wealthy");
        assert_eq!(economy.kind.as_deref(), Some("Mining"));
        assert_eq!(economy.status.as_deref(), Some("Wealthy"));

        let economy = parse_economy("<:eco:99> Scientific - Adequate");
        assert_eq!(economy.kind.as_deref(), Some("Scientific"));
        assert_eq!(economy.status.as_deref(), Some("Adequate"));

        let economy = parse_economy("Manufacturing");
        assert_eq!(economy.kind.as_deref(), Some("Manufacturing"));
        assert_eq!(economy.status, None);

        assert_eq!(parse_economy(""), Economy::default());
    }

    #[test]
    fn conflict_patterns_in_order() {
        assert_eq!(
            parse_conflict("3 - Active Skirmish"),
            Conflict {
                status: Some("Active Skirmish".into()),
                level: Some(3),
            }
        );
        assert_eq!(
            parse_conflict("Level 2 (minor)"),
            Conflict {
                status: Some("Level 2".into()),
                level: Some(2),
            }
        );
        assert_eq!(
            parse_conflict("4"),
            Conflict {
                status: None,
                level: Some(4),
            }
        );
        assert_eq!(
            parse_conflict("Dormant"),
            Conflict {
                status: Some("Dormant".into()),
                level: None,
            }
        );
        assert_eq!(parse_conflict(""), Conflict::default());
    }

    #[test]
    fn body_counts() {
        assert_eq!(parse_body_count("4+2"), (Some(4), Some(2)));
        assert_eq!(parse_body_count("4 + 2"), (Some(4), Some(2)));
        assert_eq!(parse_body_count("6 planets and 1 moon"), (Some(6), Some(1)));
        assert_eq!(parse_body_count("5"), (Some(5), Some(0)));
        assert_eq!(parse_body_count("unknown"), (None, None));
    }

    #[test]
    fn region_caveats() {
        assert!(is_travel_note("Only reachable via portal"));
        assert!(is_travel_note(
            "a very long region description that goes on for far too many words"
        ));
        assert!(!is_travel_note("Euclid Reach"));
        assert!(!is_travel_note("Driveway Nebula"));
    }
}
