//! # Discord Service Adapter
//!
//! Implements `ChatProvider` and `GuildDirectory` over serenity's HTTP client,
//! and the gateway `Handler` that dispatches ready / message / member-joined events.
//! This module is the only place that knows serenity's model types.

use anyhow::Result;
use async_trait::async_trait;
use serenity::all::{
    ChannelId, Context, EventHandler, GatewayIntents, GuildId, Http, Member, Message, Ready,
    RoleId, UserId,
};
use std::sync::Arc;

use crate::application::member_queue::MemberQueue;
use crate::application::router::CommandRouter;
use crate::domain::traits::{ChatProvider, GuildDirectory};
use crate::domain::types::{GuildRole, IncomingMessage, MemberJoin};
use crate::strings;

/// Gateway events the bot subscribes to.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

#[derive(Clone)]
pub struct DiscordService {
    http: Arc<Http>,
}

impl DiscordService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatProvider for DiscordService {
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<()> {
        tracing::debug!("Bot sending message to {}: {}", channel_id, content);
        ChannelId::new(channel_id).say(&self.http, content).await?;
        Ok(())
    }
}

#[async_trait]
impl GuildDirectory for DiscordService {
    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>> {
        let roles = GuildId::new(guild_id).roles(&self.http).await?;
        Ok(roles
            .into_values()
            .map(|role| GuildRole {
                id: role.id.get(),
                name: role.name,
            })
            .collect())
    }

    async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(strings::messages::GUEST_AUDIT_REASON),
            )
            .await?;
        Ok(())
    }
}

/// Event dispatcher registered with the serenity client.
pub struct Handler {
    router: CommandRouter,
    chat: DiscordService,
    queue: MemberQueue,
}

impl Handler {
    pub fn new(router: CommandRouter, chat: DiscordService, queue: MemberQueue) -> Self {
        Self {
            router,
            chat,
            queue,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("{}", strings::messages::READY);
        tracing::info!("{}", strings::logs::connected_as(&ready.user.name, ready.guilds.len()));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let own_id = ctx.cache.current_user().id.get();
        let incoming = IncomingMessage {
            author_id: msg.author.id.get(),
            channel_id: msg.channel_id.get(),
            content: msg.content,
        };

        if let Err(e) = self.router.route(&self.chat, &incoming, own_id).await {
            tracing::error!("{}", strings::logs::route_failed(&e.to_string()));
        }
    }

    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        let join = MemberJoin {
            guild_id: new_member.guild_id.get(),
            user_id: new_member.user.id.get(),
        };
        tracing::info!("{}", strings::logs::member_joined(join.user_id, join.guild_id));

        if let Err(e) = self.queue.enqueue(join).await {
            tracing::warn!("{}", strings::logs::enqueue_failed(join.user_id, &e.to_string()));
        }
    }
}
