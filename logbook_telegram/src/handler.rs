use crate::{Command, Error, Result, TelegramBot};
use teloxide::{requests::Requester, types::Message};
use tracing::{info, warn};

/// Handle bot commands
pub async fn handle_command(bot: TelegramBot, msg: Message, cmd: Command) -> Result<()> {
    let chat_id = msg.chat.id.0;
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            info!("[@{username}] Command: /start");
            bot.bot
                .send_message(msg.chat.id, Command::welcome_text())
                .await?;
        }
        Command::Help => {
            info!("[@{username}] Command: /help");
            bot.bot
                .send_message(msg.chat.id, Command::help_text())
                .await?;
        }
        Command::Collect => {
            info!("[@{username}] Command: /collect");
            let reply = match bot.collect_thread(chat_id).await {
                Ok(summary) => summary,
                Err(Error::Unauthorized(id)) => return Err(Error::Unauthorized(id)),
                Err(e) => {
                    warn!("Collection failed for chat {chat_id}: {e}");
                    format!("Collection failed: {e}")
                }
            };
            bot.bot.send_message(msg.chat.id, reply).await?;
        }
        Command::Reset => {
            info!("[@{username}] Command: /reset");
            let dropped = bot.reset_thread(chat_id).await;
            bot.bot
                .send_message(
                    msg.chat.id,
                    format!("Forgot {dropped} recorded message(s)."),
                )
                .await?;
        }
    }

    Ok(())
}

/// Handle any message (commands or regular posts)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;
    if !bot.is_allowed(chat_id) {
        return Err(Error::Unauthorized(chat_id));
    }

    if let Some(cmd) = msg.text().and_then(Command::parse_from_text) {
        return handle_command(bot, msg, cmd).await;
    }

    let raw = TelegramBot::to_raw_message(&msg);
    if raw.content.trim().is_empty() && raw.attachments.is_empty() {
        return Ok(());
    }

    bot.record(raw).await
}
