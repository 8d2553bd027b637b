//! # Aura
//!
//! Discord bot entry point:
//! - Configuration: YAML file plus environment overrides
//! - Infrastructure: Firebase record store, Discord HTTP + gateway
//! - Application: member queue, command router
//!
//! Runs until Ctrl+C / SIGTERM, then closes the gateway and drains queued joins.

use anyhow::{Context, Result};
use clap::Parser;
use serenity::Client;
use serenity::http::Http;
use std::sync::Arc;
use std::time::Duration;

use neweden::application::logging::init_tracing;
use neweden::application::member_queue::{MemberQueue, MemberQueueConfig};
use neweden::application::membership::MembershipHandler;
use neweden::application::router::CommandRouter;
use neweden::application::shutdown::wait_for_signal;
use neweden::domain::config::AppConfig;
use neweden::infrastructure::discord::{DiscordService, Handler, intents};
use neweden::infrastructure::firebase::FirebaseStore;
use neweden::infrastructure::http::build_client;
use neweden::interface::cli::Cli;
use neweden::strings::logs;

const USER_AGENT: &str = concat!("aura/", env!("CARGO_PKG_VERSION"));
const STORE_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging
    let _guard = init_tracing(&config.logging, "aura")?;
    tracing::info!("{}", logs::STARTING_AURA);

    let token = config.discord_token()?.to_string();

    // 3. Infrastructure
    let http = build_client(USER_AGENT, STORE_TIMEOUT)?;
    let store = FirebaseStore::from_config(http, &config.services.firebase)
        .context("Failed to set up the Firebase record store")?;

    let discord = DiscordService::new(Arc::new(Http::new(&token)));

    // 4. Application
    let membership = MembershipHandler::from_config(
        Arc::new(store),
        Arc::new(discord.clone()),
        &config.aura,
    );
    let queue = MemberQueue::start(MemberQueueConfig::from_aura(&config.aura), Arc::new(membership));
    let router = CommandRouter::new(&config.aura.command_prefix);

    // 5. Gateway
    let mut client = Client::builder(&token, intents())
        .event_handler(Handler::new(router, discord, queue.clone()))
        .await
        .context("Failed to create the Discord client")?;

    let shard_manager = client.shard_manager.clone();
    let gateway = tokio::spawn(async move { client.start().await });

    tokio::select! {
        res = wait_for_signal() => {
            if let Err(e) = res {
                tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            }
        }
        res = gateway => {
            match res {
                Ok(Ok(())) => tracing::warn!("Discord gateway closed"),
                Ok(Err(e)) => tracing::error!("Discord gateway failed: {}", e),
                Err(e) => tracing::error!("Discord gateway task failed: {}", e),
            }
        }
    }

    tracing::info!("{}", logs::SHUTDOWN);
    shard_manager.shutdown_all().await;
    queue.shutdown(config.aura.job_timeout()).await;

    Ok(())
}
