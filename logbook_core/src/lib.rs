#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Extraction core for community discovery templates.
//!
//! Turns loosely formatted chat messages (system, planet, flora, fauna,
//! archaeology and mineral templates) into typed records. Everything in this
//! crate is synchronous, stateless and free of I/O, so messages can be parsed
//! from any number of threads at once.

use regex::Regex;

pub mod detect;
pub mod extract;
pub mod fields;
pub mod glyph;
pub mod normalize;
pub mod record;
pub mod schema;

pub use detect::detect;
pub use extract::extract;
pub use glyph::{decode_glyphs, looks_like_glyphs};
pub use normalize::normalize;
pub use record::{ParsedRecord, Provenance, RawMessage, assemble, parse_message};
pub use schema::{
    ArchaeologyFields, Conflict, Economy, ExtraFields, ExtraValue, FaunaFields, FieldSchema,
    FloraFields, MineralFields, PlanetFields, SystemFields, TemplateKind,
};

/// Compile one of the crate's literal patterns.
#[expect(
    clippy::expect_used,
    reason = "only called with literal patterns exercised by the test suite"
)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern must compile")
}
