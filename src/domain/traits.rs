//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (gateway, store, relay, ESI).
//! Allows for pluggable implementations in the Infrastructure layer and fakes in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::error::ServiceError;
use crate::domain::killmail::{Killmail, NameRef, ZkbPointer};
use crate::domain::notification::WebhookMessage;
use crate::domain::types::{GuildRole, UserRecord};

/// Abstract interface for a Chat Provider (e.g., Discord)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a plain message to a channel
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<()>;
}

/// Guild role operations used by the membership handler
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>>;

    async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()>;
}

/// Remote per-user record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when no record exists for the user.
    async fn user_record(&self, user_id: u64) -> Result<Option<UserRecord>, ServiceError>;
}

/// Long-poll relay yielding one killmail pointer per call
#[async_trait]
pub trait KillFeed: Send + Sync {
    /// `Ok(None)` when the relay had nothing queued.
    async fn next_pointer(&self) -> Result<Option<ZkbPointer>, ServiceError>;
}

#[async_trait]
pub trait KillmailSource: Send + Sync {
    async fn killmail(&self, href: &str) -> Result<Killmail, ServiceError>;
}

/// Batch id to name resolution
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn names(&self, ids: &[i32]) -> Result<Vec<NameRef>, ServiceError>;
}

/// Destination for formatted kill notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &WebhookMessage) -> Result<(), ServiceError>;
}
