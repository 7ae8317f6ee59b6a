use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Collection error: {0}")]
    Collector(#[from] logbook_collector::Error),

    #[error("Forwarding error: {0}")]
    Forward(anyhow::Error),

    #[error("Unauthorized access from chat_id: {0}")]
    Unauthorized(i64),
}
