//! JSON export of collected records.

use logbook_core::ParsedRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::Result;

/// File name used for a thread's export.
#[must_use]
pub fn export_file_name(thread_id: i64) -> String {
    format!("thread_{thread_id}_export.json")
}

/// Serialise records as a JSON array indented with four spaces.
pub fn to_json(records: &[ParsedRecord]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;
    Ok(out)
}

/// Write `thread_<id>_export.json` into `dir` and return its path.
///
/// The directory is created when missing; an existing export is replaced.
pub fn write_export(dir: &Path, thread_id: i64, records: &[ParsedRecord]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(thread_id));
    std::fs::write(&path, to_json(records)?)?;

    info!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(path)
}
