//! Field schemas for the six discovery templates.
//!
//! Every schema is total: all known fields are always present in the
//! serialised form, `null` or `[]` when the message omitted them. Labels the
//! template does not model land in `extra_fields`, never in a typed slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::glyph::decode_glyphs;

/// The template a message instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TemplateKind {
    System = 0,
    Planet = 1,
    Flora = 2,
    Fauna = 3,
    Archaeology = 4,
    Mineral = 5,
}

impl TemplateKind {
    /// All kinds in detection priority order.
    pub const ALL: [Self; 6] = [
        Self::System,
        Self::Planet,
        Self::Flora,
        Self::Fauna,
        Self::Archaeology,
        Self::Mineral,
    ];

    /// Returns the string representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Planet => "planet",
            Self::Flora => "flora",
            Self::Fauna => "fauna",
            Self::Archaeology => "archaeology",
            Self::Mineral => "mineral",
        }
    }

    /// Capitalised name for user-facing summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Planet => "Planet",
            Self::Flora => "Flora",
            Self::Fauna => "Fauna",
            Self::Archaeology => "Archaeology",
            Self::Mineral => "Mineral",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "planet" => Ok(Self::Planet),
            "flora" => Ok(Self::Flora),
            "fauna" => Ok(Self::Fauna),
            "archaeology" => Ok(Self::Archaeology),
            "mineral" => Ok(Self::Mineral),
            _ => Err("unknown template kind"),
        }
    }
}

/// Value captured by the generic `label: value` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Text(String),
    List(Vec<String>),
}

/// Unmodelled labels keyed by their canonical snake_case form.
pub type ExtraFields = BTreeMap<String, ExtraValue>;

/// Economy line of a system template, e.g. `Trading // Booming`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}

/// Conflict line of a system template, e.g. `3 - Active Skirmish`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub status: Option<String>,
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFields {
    pub name: Option<String>,
    pub classification: Option<String>,
    pub region: Option<String>,
    pub special_note: Option<String>,
    code_raw: Option<String>,
    code_hex: Option<String>,
    pub colour: Option<String>,
    pub lifeform: Option<String>,
    pub economy: Economy,
    pub conflict: Conflict,
    pub planets: Option<u32>,
    pub moons: Option<u32>,
    pub coordinates: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

impl SystemFields {
    /// Record the system code; the hex form is always derived from `raw`.
    pub fn set_code(&mut self, raw: String) {
        self.code_hex = Some(decode_glyphs(&raw));
        self.code_raw = Some(raw);
    }

    #[must_use]
    pub fn code_raw(&self) -> Option<&str> {
        self.code_raw.as_deref()
    }

    #[must_use]
    pub fn code_hex(&self) -> Option<&str> {
        self.code_hex.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetFields {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    glyphs_raw: Option<String>,
    glyphs_hex: Option<String>,
    pub resources: Vec<String>,
    pub weather: Option<String>,
    pub sentinel_level: Option<String>,
    pub flora: Option<String>,
    pub fauna: Option<String>,
    pub special_note: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

impl PlanetFields {
    /// Record the planet glyphs; the hex form is always derived from `raw`.
    pub fn set_glyphs(&mut self, raw: String) {
        self.glyphs_hex = Some(decode_glyphs(&raw));
        self.glyphs_raw = Some(raw);
    }

    #[must_use]
    pub fn glyphs_raw(&self) -> Option<&str> {
        self.glyphs_raw.as_deref()
    }

    #[must_use]
    pub fn glyphs_hex(&self) -> Option<&str> {
        self.glyphs_hex.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloraFields {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub star_system: Option<String>,
    pub galaxy: Option<String>,
    pub coordinates: Option<String>,
    pub biome: Option<String>,
    pub flora_type: Option<String>,
    pub rarity: Option<String>,
    pub discovery_date: Option<String>,
    pub discovered_by: Option<String>,
    pub description: Option<String>,
    pub special_note: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaunaFields {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub star_system: Option<String>,
    pub galaxy: Option<String>,
    pub coordinates: Option<String>,
    pub biome: Option<String>,
    pub fauna_class: Option<String>,
    pub temperament: Option<String>,
    pub activity_pattern: Option<String>,
    pub rarity: Option<String>,
    pub discovery_date: Option<String>,
    pub discovered_by: Option<String>,
    pub description: Option<String>,
    pub special_note: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchaeologyFields {
    pub name: Option<String>,
    pub discovery_type: Option<String>,
    pub planet: Option<String>,
    pub star_system: Option<String>,
    pub galaxy: Option<String>,
    pub coordinates: Option<String>,
    pub biome: Option<String>,
    pub depth_or_location: Option<String>,
    pub estimated_age: Option<String>,
    pub rarity: Option<String>,
    pub discovery_date: Option<String>,
    pub discovered_by: Option<String>,
    pub associated_resources: Vec<String>,
    pub description: Option<String>,
    pub special_note: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineralFields {
    pub name: Option<String>,
    pub mineral_type: Option<String>,
    pub planet: Option<String>,
    pub star_system: Option<String>,
    pub galaxy: Option<String>,
    pub coordinates: Option<String>,
    pub biome: Option<String>,
    pub formation_type: Option<String>,
    pub primary_yield: Vec<String>,
    pub secondary_yield: Vec<String>,
    pub rarity: Option<String>,
    pub discovery_date: Option<String>,
    pub discovered_by: Option<String>,
    pub description: Option<String>,
    pub special_note: Option<String>,
    pub screenshot_url: Option<String>,
    pub extra_fields: ExtraFields,
}

/// Extracted fields for one message, tagged by template.
///
/// Serialises externally tagged, so a system schema becomes
/// `{"system": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSchema {
    System(SystemFields),
    Planet(PlanetFields),
    Flora(FloraFields),
    Fauna(FaunaFields),
    Archaeology(ArchaeologyFields),
    Mineral(MineralFields),
}

impl FieldSchema {
    /// An empty schema of the given kind.
    #[must_use]
    pub fn empty(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::System => Self::System(SystemFields::default()),
            TemplateKind::Planet => Self::Planet(PlanetFields::default()),
            TemplateKind::Flora => Self::Flora(FloraFields::default()),
            TemplateKind::Fauna => Self::Fauna(FaunaFields::default()),
            TemplateKind::Archaeology => Self::Archaeology(ArchaeologyFields::default()),
            TemplateKind::Mineral => Self::Mineral(MineralFields::default()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        match self {
            Self::System(_) => TemplateKind::System,
            Self::Planet(_) => TemplateKind::Planet,
            Self::Flora(_) => TemplateKind::Flora,
            Self::Fauna(_) => TemplateKind::Fauna,
            Self::Archaeology(_) => TemplateKind::Archaeology,
            Self::Mineral(_) => TemplateKind::Mineral,
        }
    }

    #[must_use]
    pub fn screenshot_url(&self) -> Option<&str> {
        match self {
            Self::System(f) => f.screenshot_url.as_deref(),
            Self::Planet(f) => f.screenshot_url.as_deref(),
            Self::Flora(f) => f.screenshot_url.as_deref(),
            Self::Fauna(f) => f.screenshot_url.as_deref(),
            Self::Archaeology(f) => f.screenshot_url.as_deref(),
            Self::Mineral(f) => f.screenshot_url.as_deref(),
        }
    }

    #[must_use]
    pub const fn extra_fields(&self) -> &ExtraFields {
        match self {
            Self::System(f) => &f.extra_fields,
            Self::Planet(f) => &f.extra_fields,
            Self::Flora(f) => &f.extra_fields,
            Self::Fauna(f) => &f.extra_fields,
            Self::Archaeology(f) => &f.extra_fields,
            Self::Mineral(f) => &f.extra_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.as_str().parse::<TemplateKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!("none".parse::<TemplateKind>().is_err());
        assert_eq!(TemplateKind::Archaeology.label(), "Archaeology");
    }

    #[test]
    fn code_hex_follows_code_raw() {
        let mut system = SystemFields::default();
        system.set_code(":portal1::portalf:".to_string());
        assert_eq!(system.code_raw(), Some(":portal1::portalf:"));
        assert_eq!(system.code_hex(), Some("1F"));

        let mut planet = PlanetFields::default();
        planet.set_glyphs("0a1b2c".to_string());
        assert_eq!(planet.glyphs_hex(), Some("0a1b2c"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_schema_serialises_every_field() {
        let json = serde_json::to_value(FieldSchema::empty(TemplateKind::System))
            .expect("schema should serialize");
        let system = &json["system"];
        for key in [
            "name",
            "classification",
            "region",
            "special_note",
            "code_raw",
            "code_hex",
            "colour",
            "lifeform",
            "planets",
            "moons",
            "coordinates",
            "screenshot_url",
        ] {
            assert!(system[key].is_null(), "{key} should be null");
        }
        assert!(system["economy"]["type"].is_null());
        assert!(system["conflict"]["level"].is_null());
        assert_eq!(system["extra_fields"], serde_json::json!({}));
    }

    #[test]
    fn untagged_extra_values() {
        let text = serde_json::to_string(&ExtraValue::Text("a".into())).ok();
        let list = serde_json::to_string(&ExtraValue::List(vec!["a".into(), "b".into()])).ok();
        assert_eq!(text.as_deref(), Some("\"a\""));
        assert_eq!(list.as_deref(), Some("[\"a\",\"b\"]"));
    }
}
