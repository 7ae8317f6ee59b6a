//! Per-kind tallies of a collection.

use logbook_core::{ParsedRecord, TemplateKind};
use std::collections::BTreeMap;

/// Record counts per template kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    counts: BTreeMap<TemplateKind, usize>,
}

impl CollectionSummary {
    #[must_use]
    pub fn from_records(records: &[ParsedRecord]) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.entry_type).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, kind: TemplateKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// User-facing summary naming the export file.
    #[must_use]
    pub fn render(&self, export_name: &str) -> String {
        if self.is_empty() {
            return "No valid templates were found in this thread.".to_string();
        }

        let lines = TemplateKind::ALL
            .iter()
            .filter_map(|kind| match self.count(*kind) {
                0 => None,
                n => Some(format!("- {}: {n}", kind.label())),
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("Collected the following entries:\n{lines}\n\nExported to `{export_name}`")
    }
}
