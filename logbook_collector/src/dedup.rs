//! Content hashing for skipping repeated messages.

use logbook_core::{RawMessage, normalize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Compute a SHA-256 hash of a message's normalised text.
///
/// Lines are normalised before hashing, so reposts that only differ in
/// bullets, quotes or spacing hash the same.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    for line in content.lines().map(normalize).filter(|line| !line.is_empty()) {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

/// Remembers which message contents have been seen.
#[derive(Debug, Default)]
pub struct Deduper {
    seen: HashSet<String>,
}

impl Deduper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time a content is offered, false for repeats.
    pub fn first_seen(&mut self, message: &RawMessage) -> bool {
        self.seen.insert(content_hash(&message.content))
    }
}
