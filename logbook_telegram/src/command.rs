use teloxide::types::BotCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Collect,
    Reset,
}

impl Command {
    fn all() -> Vec<BotCommand> {
        vec![
            BotCommand {
                command: "start".to_string(),
                description: "Start recording this chat".to_string(),
            },
            BotCommand {
                command: "collect".to_string(),
                description: "Parse every recorded template and export them".to_string(),
            },
            BotCommand {
                command: "reset".to_string(),
                description: "Forget the messages recorded so far".to_string(),
            },
            BotCommand {
                command: "help".to_string(),
                description: "Show help".to_string(),
            },
        ]
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::all()
    }

    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();

        // Remove bot mention if present (e.g., "/collect@my_bot")
        let command = text.split('@').next().unwrap_or(&text);

        match command {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/collect" | "/collect_entry" => Some(Self::Collect),
            "/reset" => Some(Self::Reset),
            _ => None,
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"
📒 Logbook Bot

Commands:
/start   - Start recording this chat
/collect - Parse every recorded template and export them
/reset   - Forget the messages recorded so far
/help    - Show this help

Post system, planet, flora, fauna, archaeology or mineral
templates as usual; run /collect when the thread is done.
"
    }

    #[must_use]
    pub const fn welcome_text() -> &'static str {
        r"
👋 Logbook is recording this chat.

Every template posted from now on is kept until you run /collect.
Send /help to see the command list.
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_mentions() {
        assert_eq!(Command::parse_from_text("/collect"), Some(Command::Collect));
        assert_eq!(
            Command::parse_from_text(" /Collect@logbook_bot "),
            Some(Command::Collect)
        );
        assert_eq!(Command::parse_from_text("/collect_entry"), Some(Command::Collect));
        assert_eq!(Command::parse_from_text("/reset"), Some(Command::Reset));
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_from_text("/help"), Some(Command::Help));
    }

    #[test]
    fn ignores_plain_text() {
        assert_eq!(Command::parse_from_text("System Colour: Blue"), None);
        assert_eq!(Command::parse_from_text("/unknown"), None);
        assert_eq!(Command::parse_from_text(""), None);
    }

    #[test]
    fn every_command_is_registered() {
        let names: Vec<String> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command)
            .collect();
        assert_eq!(names, vec!["start", "collect", "reset", "help"]);
    }
}
