//! # Killmail Pipeline
//!
//! Poll → fetch → collect ids → resolve names → format → notify, one killmail at a time.
//! Failures are logged and the loop carries on with the next poll; a failed name lookup
//! still produces a notification, with unresolved names. A failed poll, or a fetch that
//! failed transiently, is followed by `error_backoff` before the next poll.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::collector::collect_ids;
use crate::application::formatter::{FormatOptions, build_notification};
use crate::application::resolver::resolve_names;
use crate::domain::error::ServiceError;
use crate::domain::killmail::{NameMap, ZkbPointer};
use crate::domain::notification::WebhookMessage;
use crate::domain::traits::{KillFeed, KillmailSource, NameLookup, Notifier};
use crate::strings::logs;

/// Result of one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The relay had nothing queued.
    Idle,
    Processed { kill_id: i32 },
    /// The killmail could not be fetched; `transient` failures are worth backing off for.
    Failed { kill_id: i32, transient: bool },
}

#[derive(Debug, Clone)]
pub struct PipelineTiming {
    /// Pause after a failed poll or a transient fetch failure.
    pub error_backoff: Duration,
    /// Pause after an empty poll.
    pub idle_delay: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            error_backoff: Duration::from_secs(5),
            idle_delay: Duration::ZERO,
        }
    }
}

pub struct KillmailPipeline {
    feed: Arc<dyn KillFeed>,
    source: Arc<dyn KillmailSource>,
    names: Arc<dyn NameLookup>,
    notifier: Arc<dyn Notifier>,
    format: FormatOptions,
    timing: PipelineTiming,
}

impl KillmailPipeline {
    pub fn new(
        feed: Arc<dyn KillFeed>,
        source: Arc<dyn KillmailSource>,
        names: Arc<dyn NameLookup>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            feed,
            source,
            names,
            notifier,
            format: FormatOptions::default(),
            timing: PipelineTiming::default(),
        }
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn with_timing(mut self, timing: PipelineTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Runs until the shutdown flag flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("Killmail pipeline running");

        while !*shutdown.borrow() {
            let pause = match self.poll_once().await {
                Ok(PollOutcome::Processed { .. }) => Duration::ZERO,
                Ok(PollOutcome::Idle) => self.timing.idle_delay,
                Ok(PollOutcome::Failed { transient, .. }) if transient => self.timing.error_backoff,
                Ok(PollOutcome::Failed { .. }) => Duration::ZERO,
                Err(e) => {
                    tracing::error!("{}", logs::poll_failed(&e.to_string()));
                    self.timing.error_backoff
                }
            };

            if !pause.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(pause) => {}
                    _ = shutdown.changed() => {}
                }
            }
        }

        tracing::info!("Killmail pipeline stopped");
    }

    /// One poll of the relay, processing the pointer if there was one.
    /// Only a failed poll is returned as an error; fetch failures are logged and
    /// reported as `Failed`, notify failures are logged only.
    pub async fn poll_once(&self) -> Result<PollOutcome, ServiceError> {
        let Some(pointer) = self.feed.next_pointer().await? else {
            return Ok(PollOutcome::Idle);
        };

        let message = match self.process(&pointer).await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("{}", logs::killmail_failed(&pointer.href, &e.to_string()));
                return Ok(PollOutcome::Failed {
                    kill_id: pointer.kill_id,
                    transient: e.is_transient(),
                });
            }
        };

        if let Err(e) = self.notifier.notify(&message).await {
            tracing::error!("{}", logs::notify_failed(&e.to_string()));
        }

        Ok(PollOutcome::Processed {
            kill_id: pointer.kill_id,
        })
    }

    /// Fetches the killmail behind `pointer` and builds its notification.
    pub async fn process(&self, pointer: &ZkbPointer) -> Result<WebhookMessage, ServiceError> {
        let killmail = self.source.killmail(&pointer.href).await?;
        let ids = collect_ids(&killmail);

        let names = match resolve_names(self.names.as_ref(), &ids).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("{}", logs::names_failed(&e.to_string()));
                NameMap::new()
            }
        };

        tracing::info!("{}", logs::kill_processed(killmail.killmail_id, ids.len()));
        Ok(build_notification(&killmail, pointer, &names, &self.format))
    }
}
