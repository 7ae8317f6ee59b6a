use logbook_core::{Provenance, RawMessage, parse_message};
use std::path::PathBuf;
use tracing::info;

/// Input for the parse command.
pub struct ParseInput {
    /// File holding one message's text
    pub file: PathBuf,
    /// Optional attachment URL
    pub attachment: Option<String>,
}

/// Strategy for parsing a single message from a file.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&input.file)?;
        info!("Parsing {}", input.file.display());

        let mut message = RawMessage::new(
            content,
            Provenance {
                thread_id: 0,
                message_id: 0,
                submitted_by: 0,
                timestamp: chrono::Utc::now(),
            },
        );
        if let Some(url) = input.attachment {
            message = message.with_attachment(url);
        }

        match parse_message(&message) {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("Not a template."),
        }

        Ok(())
    }
}
