use crate::{Error, Result};
use logbook_collector::{Collector, CollectorOptions, export_file_name, write_export};
use logbook_config::Config;
use logbook_core::{Provenance, RawMessage};
use logbook_forward::{HttpForwarder, forward_all};
use std::{collections::HashMap, sync::Arc, time::Duration};
use teloxide::prelude::*;
use teloxide::types::Message;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{info, warn};

const FILE_REFERENCE_PREFIX: &str = "tg-file:";

/// Telegram bot that records chat messages and collects their templates.
///
/// The Bot API cannot enumerate a chat's history, so each allowed chat keeps
/// a buffer of every non-command message seen since the last `/reset`.
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Configuration
    pub config: Config,
    /// Recorded messages: `chat_id` -> messages in arrival order
    threads: Arc<Mutex<HashMap<i64, Vec<RawMessage>>>>,
    /// Allowed chat IDs
    allowed_chats: Vec<i64>,
    collector: Collector,
    forwarder: Option<Arc<HttpForwarder>>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(token: String, config: Config, allowed_chats: &[String]) -> Result<Self> {
        // Parse allowed chat IDs
        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| s.parse::<i64>().ok())
            .collect();

        let forwarder = if config.forward.enabled {
            let forwarder = HttpForwarder::from_config(&config.forward).map_err(Error::Forward)?;
            Some(Arc::new(forwarder))
        } else {
            None
        };

        let collector = Collector::new(CollectorOptions {
            dedupe: config.export.dedupe,
        });

        Ok(Self {
            bot: Bot::new(token),
            config,
            threads: Arc::new(Mutex::new(HashMap::new())),
            allowed_chats,
            collector,
            forwarder,
        })
    }

    /// Check if a chat is allowed
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    /// Token-free reference to an uploaded file, `tg-file:<file_id>`.
    ///
    /// Download URLs embed the bot token, so records only carry the file id;
    /// whoever holds the token resolves it with `getFile`.
    #[must_use]
    pub fn file_reference(file_id: &str) -> String {
        format!("{FILE_REFERENCE_PREFIX}{file_id}")
    }

    /// Convert a chat message into the collector's input form.
    #[must_use]
    pub fn to_raw_message(msg: &Message) -> RawMessage {
        let content = msg.text().or_else(|| msg.caption()).unwrap_or_default();

        let mut attachments = Vec::new();
        // Telegram sends every resolution of a photo; the last is the largest.
        if let Some(photo) = msg.photo().and_then(<[_]>::last) {
            attachments.push(Self::file_reference(&photo.file.id.0));
        }
        if let Some(document) = msg.document() {
            attachments.push(Self::file_reference(&document.file.id.0));
        }

        RawMessage {
            content: content.to_string(),
            attachments,
            meta: Provenance {
                thread_id: msg.chat.id.0,
                message_id: i64::from(msg.id.0),
                submitted_by: msg.from.as_ref().map_or(0, |user| user.id.0),
                timestamp: msg.date,
            },
        }
    }

    /// Append a message to its chat's thread.
    pub async fn record(&self, message: RawMessage) -> Result<()> {
        let chat_id = message.meta.thread_id;
        if !self.is_allowed(chat_id) {
            return Err(Error::Unauthorized(chat_id));
        }

        let mut threads = self.threads.lock().await;
        let thread = threads.entry(chat_id).or_default();
        thread.push(message);
        info!("Recorded message #{} for chat {chat_id}", thread.len());
        Ok(())
    }

    /// Forget everything recorded for a chat.
    pub async fn reset_thread(&self, chat_id: i64) -> usize {
        let mut threads = self.threads.lock().await;
        threads.remove(&chat_id).map_or(0, |thread| thread.len())
    }

    /// Parse the chat's recorded thread, export it and forward when enabled.
    ///
    /// Returns the summary text for the chat.
    pub async fn collect_thread(&self, chat_id: i64) -> Result<String> {
        if !self.is_allowed(chat_id) {
            return Err(Error::Unauthorized(chat_id));
        }

        let messages = {
            let threads = self.threads.lock().await;
            threads.get(&chat_id).cloned().unwrap_or_default()
        };

        let collection = self.collector.collect(&messages);
        write_export(&self.config.export.dir, chat_id, &collection.records)?;
        let mut summary = collection.summary.render(&export_file_name(chat_id));

        let forwarder = self
            .forwarder
            .as_ref()
            .filter(|_| !collection.records.is_empty());
        if let Some(forwarder) = forwarder {
            let report = forward_all(forwarder.as_ref(), &collection.records).await;
            summary = format!(
                "{summary}\nForwarded {} record(s), {} failed.",
                report.sent, report.failed
            );
        }

        Ok(summary)
    }

    /// Test connection to Telegram API with backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        bot_user
                            .user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        bot_user.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    // 2s, 4s, 6s, 8s, 10s, 10s, ...
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        // Test connection with backoff retry before starting dispatcher
        self.test_connection().await?;

        if let Err(e) = self
            .bot
            .set_my_commands(crate::Command::bot_commands())
            .await
        {
            warn!("Failed to register bot commands: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn raw(chat_id: i64, message_id: i64, text: &str) -> RawMessage {
        RawMessage::new(
            text,
            Provenance {
                thread_id: chat_id,
                message_id,
                submitted_by: 1,
                timestamp: DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default(),
            },
        )
    }

    fn bot(allowed: &[&str], dir: &std::path::Path) -> Result<TelegramBot> {
        let mut config = Config::default();
        config.export.dir = dir.to_path_buf();
        let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        TelegramBot::new("123:test".to_string(), config, &allowed)
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn collects_recorded_thread() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bot = bot(&[], dir.path()).expect("bot should build");

        bot.record(raw(9, 1, "System Colour: Blue")).await.expect("recorded");
        bot.record(raw(9, 2, "nice!")).await.expect("recorded");
        bot.record(raw(9, 3, "Fauna Class: Bird")).await.expect("recorded");

        let summary = bot.collect_thread(9).await.expect("collect should succeed");
        assert_eq!(
            summary,
            "Collected the following entries:\n- System: 1\n- Fauna: 1\n\nExported to `thread_9_export.json`"
        );
        assert!(dir.path().join("thread_9_export.json").exists());

        assert_eq!(bot.reset_thread(9).await, 3);
        let summary = bot.collect_thread(9).await.expect("collect should succeed");
        assert_eq!(summary, "No valid templates were found in this thread.");
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn exports_never_contain_the_token() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bot = bot(&[], dir.path()).expect("bot should build");
        let token = bot.bot.token().to_string();

        let mut message = raw(9, 1, "Fauna Class: Bird");
        message.attachments.push(TelegramBot::file_reference("AgACAgQAAx0"));
        bot.record(message).await.expect("recorded");
        bot.collect_thread(9).await.expect("collect should succeed");

        let export = std::fs::read_to_string(dir.path().join("thread_9_export.json"))
            .expect("export should be readable");
        assert!(export.contains("\"screenshot_url\": \"tg-file:AgACAgQAAx0\""));
        assert!(!export.contains(&token));
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn rejects_unlisted_chats() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bot = bot(&["5", "not-a-number"], dir.path()).expect("bot should build");

        assert!(bot.is_allowed(5));
        assert!(!bot.is_allowed(6));
        assert!(matches!(
            bot.record(raw(6, 1, "System Colour: Blue")).await,
            Err(Error::Unauthorized(6))
        ));
        assert!(matches!(
            bot.collect_thread(6).await,
            Err(Error::Unauthorized(6))
        ));
    }
}
