//! Mineral template.

use super::{FieldRule, Template};
use crate::schema::{ExtraFields, MineralFields, TemplateKind};

type Rule = FieldRule<MineralFields>;

const RULES: &[Rule] = &[
    Rule {
        labels: &["Name"],
        apply: |f, s| f.name = s.text(),
    },
    Rule {
        labels: &["Mineral Type"],
        apply: |f, s| f.mineral_type = s.text(),
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
        labels: &["Formation Type"],
        apply: |f, s| f.formation_type = s.text(),
    },
    Rule {
        labels: &["Primary Resource Yield"],
        apply: |f, s| {
            if let Some(resources) = s.list() {
                f.primary_yield = resources;
            }
        },
    },
    Rule {
        labels: &["Secondary Resource Yield"],
        apply: |f, s| {
            if let Some(resources) = s.list() {
                f.secondary_yield = resources;
            }
        },
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

impl Template for MineralFields {
    const KIND: TemplateKind = TemplateKind::Mineral;
    const FALLBACK_LISTS: bool = true;

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
