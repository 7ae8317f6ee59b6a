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

mod command;

use clap::{Parser, Subcommand};
use command::{
    CollectInput, CollectStrategy, CommandStrategy, InfoStrategy, InitStrategy, ParseInput,
    ParseStrategy, TelegramInput, TelegramStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "logbook")]
#[command(about = "Discovery template collector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show effective configuration
    Info,
    /// Show version
    Version,
    /// Parse a text file as a single message and print the record
    Parse {
        /// File holding the message text
        file: PathBuf,

        /// Attachment URL to treat as the message's screenshot
        #[arg(short, long)]
        attachment: Option<String>,
    },
    /// Collect a thread dump (JSON array of messages) and export it
    Collect {
        /// JSON file with the thread's messages
        thread: PathBuf,

        /// Directory for the export file (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Forward records to the collector endpoints
        #[arg(long)]
        forward: bool,

        /// Skip repeated messages
        #[arg(long)]
        dedupe: bool,
    },
    /// Run the Telegram bot
    Telegram {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,

        /// Allowed chat IDs (overrides config)
        #[arg(short, long, num_args = 1..)]
        allow_from: Option<Vec<String>>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Parse { file, attachment } => {
            ParseStrategy
                .execute(ParseInput { file, attachment })
                .await
        }
        Commands::Collect {
            thread,
            out_dir,
            forward,
            dedupe,
        } => {
            CollectStrategy
                .execute(CollectInput {
                    thread,
                    out_dir,
                    forward,
                    dedupe,
                })
                .await
        }
        Commands::Telegram { token, allow_from } => {
            TelegramStrategy
                .execute(TelegramInput { token, allow_from })
                .await
        }
    }
}
