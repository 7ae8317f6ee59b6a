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
    clippy::missing_errors_doc
)]

//! Thread collection: parse every message of a thread, tally and export.

pub mod dedup;
mod error;
pub mod export;
mod summary;

pub use dedup::{Deduper, content_hash};
pub use error::{Error, Result};
pub use export::{export_file_name, write_export};
pub use summary::CollectionSummary;

use logbook_core::{ParsedRecord, RawMessage, parse_message};
use rayon::prelude::*;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectorOptions {
    /// Skip messages whose normalised content was already seen.
    pub dedupe: bool,
}

/// Records parsed from one thread, in message order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub records: Vec<ParsedRecord>,
    pub summary: CollectionSummary,
    pub skipped_duplicates: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Collector {
    options: CollectorOptions,
}

impl Collector {
    #[must_use]
    pub const fn new(options: CollectorOptions) -> Self {
        Self { options }
    }

    /// Parse every message; non-templates are dropped.
    ///
    /// Messages are parsed in parallel but the records keep input order.
    #[must_use]
    pub fn collect(&self, messages: &[RawMessage]) -> Collection {
        let mut skipped_duplicates = 0;
        let candidates: Vec<&RawMessage> = if self.options.dedupe {
            let mut deduper = Deduper::new();
            messages
                .iter()
                .filter(|message| {
                    let fresh = deduper.first_seen(message);
                    if !fresh {
                        debug!("Skipping repeated message {}", message.meta.message_id);
                        skipped_duplicates += 1;
                    }
                    fresh
                })
                .collect()
        } else {
            messages.iter().collect()
        };

        let records: Vec<ParsedRecord> = candidates
            .into_par_iter()
            .filter_map(parse_message)
            .collect();

        info!(
            "Parsed {} template(s) from {} message(s)",
            records.len(),
            messages.len()
        );

        Collection {
            summary: CollectionSummary::from_records(&records),
            records,
            skipped_duplicates,
        }
    }
}
