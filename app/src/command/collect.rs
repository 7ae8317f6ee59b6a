use logbook_collector::{Collector, CollectorOptions, export_file_name, write_export};
use logbook_config::Config;
use logbook_core::RawMessage;
use logbook_forward::{HttpForwarder, forward_all};
use std::path::PathBuf;
use tracing::info;

/// Input for the collect command.
pub struct CollectInput {
    /// JSON file holding an array of messages
    pub thread: PathBuf,
    /// Optional export directory (overrides config)
    pub out_dir: Option<PathBuf>,
    /// Forward records even when forwarding is disabled in config
    pub forward: bool,
    /// Skip repeated messages even when disabled in config
    pub dedupe: bool,
}

/// Strategy for collecting a thread dump from disk.
#[derive(Debug, Clone, Copy)]
pub struct CollectStrategy;

impl super::CommandStrategy for CollectStrategy {
    type Input = CollectInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        let content = std::fs::read_to_string(&input.thread)?;
        let messages: Vec<RawMessage> = serde_json::from_str(&content)?;
        info!(
            "Loaded {} message(s) from {}",
            messages.len(),
            input.thread.display()
        );

        let thread_id = messages.first().map_or(0, |m| m.meta.thread_id);
        let collector = Collector::new(CollectorOptions {
            dedupe: input.dedupe || config.export.dedupe,
        });
        let collection = collector.collect(&messages);

        let out_dir = input.out_dir.unwrap_or_else(|| config.export.dir.clone());
        let path = write_export(&out_dir, thread_id, &collection.records)?;
        info!("Export written to {}", path.display());

        println!("{}", collection.summary.render(&export_file_name(thread_id)));
        if collection.skipped_duplicates > 0 {
            println!("Skipped {} repeated message(s).", collection.skipped_duplicates);
        }

        if (input.forward || config.forward.enabled) && !collection.records.is_empty() {
            let forwarder = HttpForwarder::from_config(&config.forward)?;
            let report = forward_all(&forwarder, &collection.records).await;
            println!(
                "Forwarded {} record(s), {} failed.",
                report.sent, report.failed
            );
            if report.failed > 0 {
                anyhow::bail!("{} record(s) could not be forwarded", report.failed);
            }
        }

        Ok(())
    }
}
