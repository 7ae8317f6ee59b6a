//! Message input and record output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::detect;
use crate::extract::extract;
use crate::schema::{FieldSchema, TemplateKind};

/// Where a message came from. Copied verbatim onto every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub thread_id: i64,
    pub message_id: i64,
    pub submitted_by: u64,
    pub timestamp: DateTime<Utc>,
}

/// One chat message as handed over by the message source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub meta: Provenance,
}

impl RawMessage {
    #[must_use]
    pub fn new(content: impl Into<String>, meta: Provenance) -> Self {
        Self {
            content: content.into(),
            attachments: Vec::new(),
            meta,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachments.push(url.into());
        self
    }

    /// Text lines in document order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    #[must_use]
    pub fn first_attachment(&self) -> Option<&str> {
        self.attachments.first().map(String::as_str)
    }
}

/// A parsed template: `{entry_type, <kind>: {...}, meta}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub entry_type: TemplateKind,
    #[serde(flatten)]
    pub schema: FieldSchema,
    pub meta: Provenance,
}

/// Wrap extracted fields together with the message provenance.
///
/// The template kind is not passed in: `entry_type` is read from the
/// schema variant, so the two can never disagree.
#[must_use]
pub fn assemble(schema: FieldSchema, message: &RawMessage) -> ParsedRecord {
    ParsedRecord {
        entry_type: schema.kind(),
        schema,
        meta: message.meta.clone(),
    }
}

/// Detect, extract and assemble one message.
///
/// Returns `None` when the message is not one of the six templates.
#[must_use]
pub fn parse_message(message: &RawMessage) -> Option<ParsedRecord> {
    let kind = detect(&message.content)?;
    Some(assemble(extract(kind, message), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Provenance {
        Provenance {
            thread_id: 10,
            message_id: 20,
            submitted_by: 30,
            timestamp: DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default(),
        }
    }

    #[test]
    fn assemble_copies_provenance() {
        let message = RawMessage::new("Flora Type: Tree", meta());
        let record = assemble(FieldSchema::empty(TemplateKind::Flora), &message);
        assert_eq!(record.entry_type, TemplateKind::Flora);
        assert_eq!(record.meta, message.meta);
    }

    #[test]
    fn non_templates_are_skipped() {
        let message = RawMessage::new("hello everyone, nice find!", meta());
        assert!(parse_message(&message).is_none());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn record_serialises_with_kind_key() {
        let message = RawMessage::new("Fauna Class: Bird\nName: Skitter", meta());
        let record = parse_message(&message).expect("fauna template");
        let json = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(json["entry_type"], "fauna");
        assert_eq!(json["fauna"]["fauna_class"], "Bird");
        assert_eq!(json["meta"]["thread_id"], 10);
        assert_eq!(json["meta"]["timestamp"], "2024-05-01T12:00:00Z");

        let back: ParsedRecord = serde_json::from_value(json).expect("record should deserialize");
        assert_eq!(back, record);
    }
}
