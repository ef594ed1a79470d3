//! Telegram Bot API channel.
//!
//! One `sendMessage` call per run, HTML parse mode.
//! Docs: <https://core.telegram.org/bots/api#sendmessage>

pub(crate) mod send;
pub(crate) mod types;


use async_trait::async_trait;
use herald_core::{
    config::Config,
    error::HeraldError,
    message::OutboundMessage,
    traits::{Delivery, Notifier},
};
use std::time::Duration;

/// Telegram channel using the Bot API.
pub struct TelegramChannel {
    client: reqwest::Client,
    /// `{api_base}/bot{token}`. Never logged.
    base_url: String,
    api_base: String,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: &Config) -> Result<Self, HeraldError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Follow redirects like the workflow's HTTP client did; 10 hops.
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HeraldError::Channel(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", config.api_base, config.bot_token),
            api_base: config.api_base.clone(),
        })
    }

    /// Endpoint for log lines, with the token masked.
    pub(crate) fn redacted(&self, method: &str) -> String {
        format!("{}/bot<redacted>/{method}", self.api_base)
    }
}

#[async_trait]
impl Notifier for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &OutboundMessage) -> Result<Delivery, HeraldError> {
        self.send_message(message).await
    }
}
