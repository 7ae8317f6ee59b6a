use async_trait::async_trait;
use logbook_config::ForwardConfig;
use logbook_core::{ParsedRecord, TemplateKind};
use reqwest::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::retry::retry_with_backoff;
use crate::sink::RecordSink;

/// Posts records as JSON to `<base_url>/<entry_type>`.
pub struct HttpForwarder {
    client: Client,
    base_url: Url,
    retry_delays: Vec<u64>,
    final_retries: usize,
}

impl HttpForwarder {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Forward URL cannot be used as a base: {base_url}");
        }
        // Without the trailing slash `join` would replace the last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        info!("Creating HttpForwarder for {base_url}");
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            retry_delays: Vec::new(),
            final_retries: 0,
        })
    }

    pub fn from_config(config: &ForwardConfig) -> anyhow::Result<Self> {
        Ok(
            Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?
                .with_retry(config.retry_delays.clone(), config.final_retries),
        )
    }

    #[must_use]
    pub fn with_retry(mut self, retry_delays: Vec<u64>, final_retries: usize) -> Self {
        self.retry_delays = retry_delays;
        self.final_retries = final_retries;
        self
    }

    /// Endpoint that receives records of `kind`.
    pub fn endpoint(&self, kind: TemplateKind) -> anyhow::Result<Url> {
        Ok(self.base_url.join(kind.as_str())?)
    }

    /// Helper method to send a single request
    async fn try_send(&self, url: &Url, record: &ParsedRecord) -> anyhow::Result<()> {
        let response = self.client.post(url.clone()).json(record).send().await?;
        let status = response.status();

        if status.is_success() {
            info!("POST {url} status={status}");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("POST {url} failed with status {status}: {body}")
    }
}

#[async_trait]
impl RecordSink for HttpForwarder {
    async fn send(&self, record: &ParsedRecord) -> anyhow::Result<()> {
        let url = self.endpoint(record.entry_type)?;
        retry_with_backoff(
            || self.try_send(&url, record),
            &self.retry_delays,
            self.final_retries,
        )
        .await
    }
}
