//! Flora template.

use super::{FieldRule, Template};
use crate::schema::{ExtraFields, FloraFields, TemplateKind};

type Rule = FieldRule<FloraFields>;

const RULES: &[Rule] = &[
    Rule {
        labels: &["Name"],
        apply: |f, s| f.name = s.text(),
    },
    Rule {
        labels: &["Planet"],
        apply: |f, s| f.planet = s.text(),
    },
    Rule {
        labels: &["Star System"],
        apply: |f, s| f.star_system = s.text(),
    },
    Rule {
        labels: &["Galaxy"],
        apply: |f, s| f.galaxy = s.text(),
    },
    Rule {
        labels: &["Coordinates"],
        apply: |f, s| f.coordinates = s.text(),
    },
    Rule {
        labels: &["Biome"],
        apply: |f, s| f.biome = s.text(),
    },
    Rule {
        labels: &["Flora Type"],
        apply: |f, s| f.flora_type = s.text(),
    },
    Rule {
        labels: &["Rarity"],
        apply: |f, s| f.rarity = s.text(),
    },
    Rule {
        labels: &["Discovery Date"],
        apply: |f, s| f.discovery_date = s.text(),
    },
    Rule {
        labels: &["Discovered By"],
        apply: |f, s| f.discovered_by = s.text(),
    },
    Rule {
        labels: &["Description"],
        apply: |f, s| f.description = s.block(),
    },
    Rule {
        labels: &["Special Note"],
        apply: |f, s| f.special_note = s.block(),
    },
];

impl Template for FloraFields {
    const KIND: TemplateKind = TemplateKind::Flora;

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
