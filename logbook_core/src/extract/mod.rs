//! Rule-table extraction engine.
//!
//! All six templates share one scan: each line is tested against the
//! template's ordered [`FieldRule`] table and the first matching rule wins.
//! Lines no rule claims fall through to the shared screenshot rule and then
//! to the generic `label: value` rule, which writes into `extra_fields`.

mod archaeology;
mod cursor;
mod fauna;
mod flora;
mod mineral;
mod planet;
mod system;

use tracing::debug;

use crate::fields::{
    canonical_key, find_url, has_list_delimiter, is_section_delimiter, label_present, non_empty,
    split_list, strip_emoji_tags, trim_value, value_after_colon,
};
use crate::glyph::looks_like_glyphs;
use crate::record::RawMessage;
use crate::schema::{ExtraFields, ExtraValue, FieldSchema, TemplateKind};

use cursor::{Cursor, LOOKAHEAD_LINES, Line, URL_SEARCH_LINES};

pub use planet::parse_sentinel_level;
pub use system::{is_travel_note, parse_body_count, parse_conflict, parse_economy};

/// One template field: the labels that select it and how to fill it.
pub(crate) struct FieldRule<S> {
    pub labels: &'static [&'static str],
    pub apply: fn(&mut S, &mut Scan<'_>),
}

impl<S> FieldRule<S> {
    fn matches(&self, clean: &str) -> bool {
        self.labels.iter().any(|label| label_present(clean, label))
    }
}

/// A template schema together with its rule table.
pub(crate) trait Template: Default + 'static {
    const KIND: TemplateKind;

    /// Whether generic values holding `,` `/` or `-` are stored as lists.
    const FALLBACK_LISTS: bool = false;

    /// Field rules in priority order.
    fn rules() -> &'static [FieldRule<Self>];

    fn screenshot_url(&mut self) -> &mut Option<String>;

    fn extra_fields(&mut self) -> &mut ExtraFields;

    /// Hook run once after the line scan.
    fn finish(&mut self, _message: &RawMessage) {}
}

/// Read access to the current line for field rules.
pub(crate) struct Scan<'a> {
    cursor: Cursor<'a>,
    attachment: Option<&'a str>,
}

impl Scan<'_> {
    fn line(&self) -> &str {
        self.cursor.current().map_or("", |line| line.clean.as_str())
    }

    /// Inline value of the current line, trimmed; may be empty.
    pub fn inline(&self) -> &str {
        trim_value(value_after_colon(self.line()))
    }

    pub fn text(&self) -> Option<String> {
        non_empty(self.inline())
    }

    pub fn text_without_emoji(&self) -> Option<String> {
        non_empty(&strip_emoji_tags(self.inline()))
    }

    /// Inline value plus the following lines up to the next field.
    pub fn block(&mut self) -> Option<String> {
        let inline = self.inline().to_string();
        let rest = self.cursor.take_block();
        let joined = [inline.as_str(), rest.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        non_empty(joined.trim())
    }

    /// Inline value, or a bounded lookahead block when the label stands alone.
    pub fn inline_or_lookahead(&mut self) -> Option<String> {
        self.text()
            .or_else(|| self.cursor.take_lookahead(LOOKAHEAD_LINES))
    }

    /// List value split on `,` `/` `-`; `None` when there is no text at all.
    pub fn list(&mut self) -> Option<Vec<String>> {
        self.text()
            .or_else(|| self.cursor.take_lookahead(LOOKAHEAD_LINES))
            .map(|value| split_list(&value))
    }

    /// Inline value, or a following block only if it looks like glyphs.
    pub fn glyph_block(&mut self) -> Option<String> {
        if let Some(value) = self.text() {
            return Some(value);
        }
        let block = self.cursor.lookahead(LOOKAHEAD_LINES)?;
        if !looks_like_glyphs(&block.text) {
            return None;
        }
        self.cursor.seek(block.last);
        Some(block.text)
    }

    /// Attachment first, then a URL on this line or just below it.
    fn screenshot(&self) -> Option<String> {
        self.attachment
            .or_else(|| self.cursor.url_nearby(URL_SEARCH_LINES))
            .map(str::to_string)
    }
}

enum Step<S: 'static> {
    Rule(&'static FieldRule<S>),
    Screenshot,
    Generic,
    Skip,
}

fn classify<T: Template>(line: &Line<'_>) -> Step<T> {
    if let Some(rule) = T::rules().iter().find(|rule| rule.matches(&line.clean)) {
        return Step::Rule(rule);
    }
    if label_present(&line.clean, "Screenshot") || is_section_delimiter(line.raw) {
        return Step::Screenshot;
    }
    let bare_url = find_url(&line.clean).is_some_and(|url| line.clean.starts_with(url));
    if line.clean.contains(':') && !bare_url {
        Step::Generic
    } else {
        Step::Skip
    }
}

fn generic_field<T: Template>(fields: &mut T, clean: &str) {
    let Some((label, _)) = clean.split_once(':') else {
        return;
    };
    let key = canonical_key(label);
    if key.is_empty() {
        return;
    }

    let value = trim_value(value_after_colon(clean));
    let value = if T::FALLBACK_LISTS && has_list_delimiter(value) {
        ExtraValue::List(split_list(value))
    } else {
        ExtraValue::Text(value.to_string())
    };

    debug!("Captured unmodelled {} field '{key}'", T::KIND);
    fields.extra_fields().insert(key, value);
}

fn run<T: Template>(message: &RawMessage) -> T {
    let mut fields = T::default();
    let mut scan = Scan {
        cursor: Cursor::new(message.lines()),
        attachment: message.first_attachment(),
    };

    loop {
        let step = match scan.cursor.current() {
            Some(line) => classify::<T>(line),
            None => break,
        };

        match step {
            Step::Rule(rule) => (rule.apply)(&mut fields, &mut scan),
            Step::Screenshot => {
                if let Some(url) = scan.screenshot() {
                    *fields.screenshot_url() = Some(url);
                }
            }
            Step::Generic => generic_field(&mut fields, scan.line()),
            Step::Skip => {}
        }

        scan.cursor.advance();
    }

    if fields.screenshot_url().is_none() {
        if let Some(url) = message.first_attachment() {
            *fields.screenshot_url() = Some(url.to_string());
        }
    }

    fields.finish(message);
    fields
}

/// Run the extractor for `kind` over a message.
///
/// Never fails: fields the message does not provide stay `None` or empty.
#[must_use]
pub fn extract(kind: TemplateKind, message: &RawMessage) -> FieldSchema {
    match kind {
        TemplateKind::System => FieldSchema::System(run(message)),
        TemplateKind::Planet => FieldSchema::Planet(run(message)),
        TemplateKind::Flora => FieldSchema::Flora(run(message)),
        TemplateKind::Fauna => FieldSchema::Fauna(run(message)),
        TemplateKind::Archaeology => FieldSchema::Archaeology(run(message)),
        TemplateKind::Mineral => FieldSchema::Mineral(run(message)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::record::Provenance;
    use crate::schema::{ArchaeologyFields, FloraFields, PlanetFields, SystemFields};

    fn message(text: &str) -> RawMessage {
        RawMessage::new(
            text,
            Provenance {
                thread_id: 1,
                message_id: 2,
                submitted_by: 3,
                timestamp: DateTime::from_timestamp(0, 0).unwrap_or_default(),
            },
        )
    }

    #[test]
    fn first_matching_rule_wins() {
        let fields: FloraFields = run(&message("Planet Name: Ostra\nFlora Type: Shrub"));
        assert_eq!(fields.name.as_deref(), Some("Ostra"));
        assert_eq!(fields.planet, None);
        assert_eq!(fields.flora_type.as_deref(), Some("Shrub"));
    }

    #[test]
    fn generic_rule_keeps_unknown_labels() {
        let fields: PlanetFields = run(&message(
            "Planet Type: Frozen\nTerrain: Rolling Hills\nMoon Count (approx.): 2",
        ));
        assert_eq!(fields.kind.as_deref(), Some("Frozen"));
        assert_eq!(
            fields.extra_fields.get("terrain"),
            Some(&ExtraValue::Text("Rolling Hills".into()))
        );
        assert_eq!(
            fields.extra_fields.get("moon_count_approx"),
            Some(&ExtraValue::Text("2".into()))
        );
    }

    #[test]
    fn generic_rule_skips_unnamed_labels_and_bare_urls() {
        let fields: SystemFields = run(&message(
            "System Colour: Red\n: stray colon\nhttps://cdn.example.com/a.png",
        ));
        assert!(fields.extra_fields.is_empty());
    }

    #[test]
    fn generic_lists_only_for_catalogue_kinds() {
        let text = "Discovery Type: Ruin\nNearby: Copper, Gold";
        let arch: ArchaeologyFields = run(&message(text));
        assert_eq!(
            arch.extra_fields.get("nearby"),
            Some(&ExtraValue::List(vec!["Copper".into(), "Gold".into()]))
        );

        let flora: FloraFields = run(&message(text));
        assert_eq!(
            flora.extra_fields.get("nearby"),
            Some(&ExtraValue::Text("Copper, Gold".into()))
        );
    }

    #[test]
    fn screenshot_from_following_lines() {
        let fields: FloraFields = run(&message(
            "Flora Type: Tree\nScreenshot:\n\nhttps://img.example/tree.png",
        ));
        assert_eq!(
            fields.screenshot_url.as_deref(),
            Some("https://img.example/tree.png")
        );
    }

    #[test]
    fn delimiter_line_triggers_screenshot_search() {
        let fields: PlanetFields = run(&message(
            "Planet Type: Lush\n-- see below\nhttps://img.example/p.png",
        ));
        assert_eq!(fields.screenshot_url.as_deref(), Some("https://img.example/p.png"));
    }

    #[test]
    fn attachment_fills_missing_screenshot() {
        let msg = message("Fauna Class: Bird").with_attachment("https://files.example/1.jpg");
        let fields = extract(TemplateKind::Fauna, &msg);
        assert_eq!(fields.screenshot_url(), Some("https://files.example/1.jpg"));
    }

    #[test]
    fn multiline_notes_consume_their_lines() {
        let fields: FloraFields = run(&message(
            "Description: Tall and blue\nglows at night\n\nsmells sweet\nRarity: Rare",
        ));
        assert_eq!(
            fields.description.as_deref(),
            Some("Tall and blue\nglows at night\n\nsmells sweet")
        );
        assert_eq!(fields.rarity.as_deref(), Some("Rare"));
        assert!(fields.extra_fields.is_empty());
    }

    #[test]
    fn empty_label_leaves_field_empty() {
        let fields: FloraFields = run(&message("Name:\nBiome:   "));
        assert_eq!(fields.name, None);
        assert_eq!(fields.biome, None);
    }
}
