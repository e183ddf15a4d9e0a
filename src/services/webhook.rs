//! Client side of the conversational backend's REST webhook contract.
//!
//! `POST {url}` with `{"sender", "message"}` answers with a JSON array of
//! reply items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};

use crate::{
    config::WebhookConfig,
    error::WebhookError,
    message::{OutboundMessage, ReplyItem},
};

/// Anything that can answer an outbound message with reply items.
#[async_trait]
pub trait Webhook: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<Vec<ReplyItem>, WebhookError>;
}

#[derive(Debug, Clone)]
pub struct RestWebhook {
    client: Client,
    config: WebhookConfig,
}

impl RestWebhook {
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    async fn send_once(&self, message: &OutboundMessage) -> Result<Vec<ReplyItem>, WebhookError> {
        let response = self
            .client
            .post(&self.config.url)
            .header(CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(code = status.as_u16(), body = %body, "webhook returned an error status");
            return Err(WebhookError::Status { code: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Webhook for RestWebhook {
    async fn send(&self, message: &OutboundMessage) -> Result<Vec<ReplyItem>, WebhookError> {
        let strategy = ExponentialBackoff::from_millis(self.config.retry_delay_ms)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(self.config.max_retries);

        let replies = Retry::start(strategy, || self.send_once(message)).await?;
        tracing::debug!(sender = %message.sender, replies = replies.len(), "webhook replied");
        Ok(replies)
    }
}
