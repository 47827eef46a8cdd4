use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;

use crate::{config::AlertConfig, domain::Alert};

/// Delivery target for positive hits. Callers log and drop failures.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<()>;
}

pub struct TelegramAlertSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramAlertSink {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.bot
            .send_message(self.chat_id, alert.text())
            .await
            .with_context(|| format!("failed to deliver alert for @{}", alert.username))?;
        tracing::debug!(
            target: "alert",
            chat_id = self.chat_id.0,
            username = %alert.username,
            "alert delivered"
        );
        Ok(())
    }
}

/// Used when no alert destination is configured.
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        tracing::info!(target: "alert", username = %alert.username, "{}", alert.text());
        Ok(())
    }
}

pub fn build_alert_sink(config: &AlertConfig) -> Arc<dyn AlertSink> {
    match (&config.bot_token, config.chat_id) {
        (Some(token), Some(chat_id)) => {
            Arc::new(TelegramAlertSink::new(Bot::new(token), chat_id))
        }
        _ => {
            tracing::info!(target: "alert", "no alert destination configured; hits are logged only");
            Arc::new(LogAlertSink)
        }
    }
}
