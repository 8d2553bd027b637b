//! # Killbot
//!
//! Long-polls the zKillboard relay, resolves each killmail's names through ESI
//! and posts a notification (webhook, or the log when no webhook is configured).

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;

use neweden::application::formatter::FormatOptions;
use neweden::application::killfeed::{KillmailPipeline, PipelineTiming};
use neweden::application::logging::init_tracing;
use neweden::application::shutdown::wait_for_signal;
use neweden::domain::config::AppConfig;
use neweden::domain::traits::Notifier;
use neweden::infrastructure::esi::EsiClient;
use neweden::infrastructure::http::build_client;
use neweden::infrastructure::redisq::RedisqFeed;
use neweden::infrastructure::webhook::{LogNotifier, WebhookNotifier};
use neweden::interface::cli::Cli;
use neweden::strings::logs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let settings = &config.killbot;

    let _guard = init_tracing(&config.logging, "killbot")?;
    tracing::info!("{}", logs::STARTING_KILLBOT);

    let http = build_client(&settings.user_agent, settings.request_timeout())?;
    let feed = Arc::new(RedisqFeed::new(http.clone(), settings.feed_url.clone()));
    let esi = Arc::new(EsiClient::new(http.clone(), &settings.esi_base_url));

    let notifier: Arc<dyn Notifier> = match settings.webhook_url.as_deref() {
        Some(url) if !url.trim().is_empty() => Arc::new(WebhookNotifier::new(http, url)),
        _ => {
            tracing::warn!("No webhook URL configured, kills are only logged");
            Arc::new(LogNotifier)
        }
    };

    let pipeline = KillmailPipeline::new(feed, esi.clone(), esi, notifier)
        .with_format(FormatOptions {
            username: Some(settings.webhook_username.clone()),
            avatar_url: settings.webhook_avatar_url.clone(),
        })
        .with_timing(PipelineTiming {
            error_backoff: settings.error_backoff(),
            idle_delay: settings.idle_delay(),
        });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn(async move { pipeline.run(shutdown_rx).await });

    if let Err(e) = wait_for_signal().await {
        tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
    }
    tracing::info!("{}", logs::SHUTDOWN);
    let _ = shutdown_tx.send(true);

    // an in-flight long poll can take a while to return
    if tokio::time::timeout(settings.request_timeout(), runner).await.is_err() {
        tracing::warn!("Pipeline did not stop in time, exiting");
    }

    Ok(())
}
