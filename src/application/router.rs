//! # Command Router
//!
//! Routes incoming chat messages to the appropriate command handler (in `interface/commands`).
//! Messages authored by the bot itself are dropped before any matching.

use anyhow::Result;
use chrono::Utc;

use crate::domain::traits::ChatProvider;
use crate::domain::types::IncomingMessage;
use crate::interface::commands;

#[derive(Debug, Clone)]
pub struct CommandRouter {
    time_prefix: String,
}

impl CommandRouter {
    pub fn new(time_prefix: &str) -> Self {
        Self {
            time_prefix: time_prefix.to_lowercase(),
        }
    }

    /// Case-insensitive prefix match. Not word-bounded: `!timers` matches `!time`.
    pub fn is_time_command(&self, content: &str) -> bool {
        !self.time_prefix.is_empty() && content.to_lowercase().starts_with(&self.time_prefix)
    }

    pub async fn route<C>(&self, chat: &C, message: &IncomingMessage, own_id: u64) -> Result<()>
    where
        C: ChatProvider + ?Sized,
    {
        if message.author_id == own_id {
            return Ok(());
        }

        if self.is_time_command(&message.content) {
            tracing::info!(
                "Router dispatching cmd='{}' channel='{}' sender='{}'",
                self.time_prefix,
                message.channel_id,
                message.author_id
            );
            return commands::time::handle_time(chat, message.channel_id, Utc::now()).await;
        }

        Ok(())
    }
}
