use logbook_config::Config;
use logbook_forward::HttpForwarder;

/// Strategy for displaying configuration information.
///
/// Outputs the effective configuration with the bot token masked, and the
/// endpoint each record kind would be forwarded to.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== logbook Configuration ===\n");

        println!("Telegram:");
        println!("  Enabled: {}", config.telegram.enabled);
        println!("  Token: {}", mask_token(&config.telegram.token));
        if config.telegram.allow_from.is_empty() {
            println!("  Allow From: (empty - all chats allowed)");
        } else {
            println!("  Allow From: {}", config.telegram.allow_from.join(", "));
        }
        println!();

        println!("Export:");
        println!("  Directory: {}", config.export.dir.display());
        println!("  Dedupe: {}", config.export.dedupe);
        println!();

        println!("Forwarding:");
        println!("  Enabled: {}", config.forward.enabled);
        println!("  Timeout: {}s", config.forward.timeout_secs);
        println!(
            "  Retry Delays: {:?} (+{} final)",
            config.forward.retry_delays, config.forward.final_retries
        );
        match HttpForwarder::from_config(&config.forward) {
            Ok(forwarder) => {
                println!("  Endpoints:");
                for kind in logbook_core::TemplateKind::ALL {
                    match forwarder.endpoint(kind) {
                        Ok(url) => println!("    {kind}: {url}"),
                        Err(e) => println!("    {kind}: invalid ({e})"),
                    }
                }
            }
            Err(e) => {
                println!("  Base URL: {} (invalid: {e})", config.forward.base_url);
            }
        }

        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    if token.is_empty() {
        "(not set)".to_string()
    } else {
        match token.get(..8) {
            Some(prefix) if token.len() > 8 => format!("{prefix}...***"),
            _ => "***".to_string(),
        }
    }
}
