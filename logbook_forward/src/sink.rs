use async_trait::async_trait;
use logbook_core::ParsedRecord;
use tracing::{info, warn};

/// Destination for parsed records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn send(&self, record: &ParsedRecord) -> anyhow::Result<()>;
}

/// Outcome of forwarding a batch of records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ForwardReport {
    pub sent: usize,
    pub failed: usize,
}

/// Send every record in order; a failed record is logged and skipped.
pub async fn forward_all<S>(sink: &S, records: &[ParsedRecord]) -> ForwardReport
where
    S: RecordSink + ?Sized,
{
    let mut report = ForwardReport::default();

    for record in records {
        match sink.send(record).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(
                    "Failed to forward {} record (message {}): {e}",
                    record.entry_type, record.meta.message_id
                );
                report.failed += 1;
            }
        }
    }

    info!(
        "Forwarded {} record(s), {} failed",
        report.sent, report.failed
    );
    report
}
