//! # Notifiers
//!
//! `WebhookNotifier` posts kill notifications to a Discord webhook.
//! `LogNotifier` only logs them, for running without a webhook.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::error::ServiceError;
use crate::domain::notification::WebhookMessage;
use crate::domain::traits::Notifier;
use crate::infrastructure::http::read_success_body;

const SERVICE: &str = "webhook";

pub struct WebhookNotifier {
    http: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &WebhookMessage) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        // Discord answers 204 with an empty body
        read_success_body(SERVICE, response).await.map(|_| ())
    }
}

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &WebhookMessage) -> Result<(), ServiceError> {
        for embed in &message.embeds {
            tracing::info!(
                "Kill: {} | system: {} | value: {}",
                embed.title.as_deref().unwrap_or("-"),
                embed.field("System").unwrap_or("-"),
                embed.field("Value").unwrap_or("-"),
            );
        }
        Ok(())
    }
}
