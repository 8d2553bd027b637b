//! # Member Queue
//!
//! Bounded queue between the gateway and the membership handler.
//!
//! Gateway tasks push joins into a fixed-capacity channel; one dispatcher task drains it
//! and runs at most `max_concurrent` handlers at a time (semaphore), each under a timeout.
//! `shutdown` stops intake, drains what was already queued, and waits for running jobs
//! up to a grace period before aborting them.

use anyhow::{Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore, mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::application::membership::MembershipHandler;
use crate::domain::config::AuraConfig;
use crate::domain::types::MemberJoin;
use crate::strings::logs;

#[derive(Debug, Clone)]
pub struct MemberQueueConfig {
    /// Joins buffered before `enqueue` starts waiting.
    pub capacity: usize,
    /// Handlers running at the same time.
    pub max_concurrent: usize,
    /// Upper bound for one join, including the store lookup delay.
    pub job_timeout: Duration,
}

impl MemberQueueConfig {
    pub fn from_aura(config: &AuraConfig) -> Self {
        Self {
            capacity: config.queue_capacity,
            max_concurrent: config.max_concurrent_lookups,
            job_timeout: config.job_timeout(),
        }
    }
}

#[derive(Clone)]
pub struct MemberQueue {
    inner: Arc<MemberQueueRef>,
}

struct MemberQueueRef {
    sender: mpsc::Sender<MemberJoin>,
    shutdown: watch::Sender<bool>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl MemberQueue {
    /// Spawns the dispatcher. Must be called inside a tokio runtime.
    pub fn start(config: MemberQueueConfig, handler: Arc<MembershipHandler>) -> Self {
        let capacity = config.capacity.max(1);
        let max_concurrent = config.max_concurrent.max(1);
        tracing::info!(
            "Starting member queue (capacity {}, max {} concurrent lookups)",
            capacity,
            max_concurrent
        );

        let (sender, receiver) = mpsc::channel(capacity);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let semaphore = Arc::new(Semaphore::new(max_concurrent));

        let dispatcher = tokio::spawn(Self::dispatch(
            receiver,
            handler,
            semaphore,
            config.job_timeout,
            shutdown_rx,
        ));

        Self {
            inner: Arc::new(MemberQueueRef {
                sender,
                shutdown,
                dispatcher: Mutex::new(Some(dispatcher)),
            }),
        }
    }

    /// Queues a join, waiting for room when the buffer is full.
    pub async fn enqueue(&self, join: MemberJoin) -> Result<()> {
        if *self.inner.shutdown.borrow() {
            bail!("member queue is shut down");
        }
        if self.inner.sender.send(join).await.is_err() {
            bail!("member queue is closed");
        }
        Ok(())
    }

    /// Stops intake and processes the joins already queued.
    /// Jobs still running after `grace` are aborted.
    pub async fn shutdown(&self, grace: Duration) {
        let _ = self.inner.shutdown.send(true);

        let Some(mut handle) = self.inner.dispatcher.lock().await.take() else {
            return;
        };

        if tokio::time::timeout(grace, &mut handle).await.is_err() {
            tracing::warn!(
                "Member queue did not drain within {}s, aborting remaining jobs",
                grace.as_secs()
            );
            handle.abort();
        }
    }

    async fn dispatch(
        mut receiver: mpsc::Receiver<MemberJoin>,
        handler: Arc<MembershipHandler>,
        semaphore: Arc<Semaphore>,
        job_timeout: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut jobs = JoinSet::new();
        let mut closing = false;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.changed(), if !closing => {
                    // buffered joins are still delivered after close()
                    closing = true;
                    receiver.close();
                }

                Some(finished) = jobs.join_next(), if !jobs.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!("Member job panicked: {}", e);
                    }
                }

                next = receiver.recv() => {
                    let Some(join) = next else { break };
                    let Ok(permit) = semaphore.clone().acquire_owned().await else { break };
                    let handler = Arc::clone(&handler);

                    jobs.spawn(async move {
                        let _permit = permit;
                        if tokio::time::timeout(job_timeout, handler.handle(join)).await.is_err() {
                            tracing::warn!("{}", logs::job_timed_out(join.user_id, job_timeout.as_secs()));
                        }
                    });
                }
            }
        }

        while let Some(finished) = jobs.join_next().await {
            if let Err(e) = finished {
                tracing::error!("Member job panicked: {}", e);
            }
        }
        tracing::info!("Member queue stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeGuild, FakeStore, StoreReply};

    fn queue(
        store: Arc<FakeStore>,
        guild: Arc<FakeGuild>,
        max_concurrent: usize,
        job_timeout: Duration,
    ) -> MemberQueue {
        let handler = MembershipHandler::new(store, guild, "Guest", Duration::ZERO);
        MemberQueue::start(
            MemberQueueConfig {
                capacity: 16,
                max_concurrent,
                job_timeout,
            },
            Arc::new(handler),
        )
    }

    fn join(user_id: u64) -> MemberJoin {
        MemberJoin {
            guild_id: 10,
            user_id,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_joins_are_drained_on_shutdown() {
        let store = Arc::new(FakeStore::new(StoreReply::NotFound));
        let guild = Arc::new(FakeGuild::with_guest(900));
        let queue = queue(store.clone(), guild.clone(), 2, Duration::from_secs(10));

        for user in 1..=5 {
            queue.enqueue(join(user)).await.unwrap();
        }
        queue.shutdown(Duration::from_secs(30)).await;

        let mut users: Vec<u64> = guild.assigned().iter().map(|(_, user, _)| *user).collect();
        users.sort();
        assert_eq!(users, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let store = Arc::new(FakeStore::new(StoreReply::NotFound).with_delay(Duration::from_millis(200)));
        let guild = Arc::new(FakeGuild::with_guest(900));
        let queue = queue(store.clone(), guild.clone(), 2, Duration::from_secs(10));

        for user in 1..=6 {
            queue.enqueue(join(user)).await.unwrap();
        }
        queue.shutdown(Duration::from_secs(30)).await;

        assert_eq!(store.calls(), 6);
        assert!(store.peak_concurrency() <= 2);
        assert_eq!(guild.assigned().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enqueue_after_shutdown_fails() {
        let store = Arc::new(FakeStore::new(StoreReply::NotFound));
        let guild = Arc::new(FakeGuild::with_guest(900));
        let queue = queue(store, guild, 1, Duration::from_secs(10));

        queue.shutdown(Duration::from_secs(1)).await;
        assert!(queue.enqueue(join(1)).await.is_err());
        // second shutdown is a no-op
        queue.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_job_times_out() {
        let store = Arc::new(FakeStore::new(StoreReply::NotFound).with_delay(Duration::from_secs(30)));
        let guild = Arc::new(FakeGuild::with_guest(900));
        let queue = queue(store.clone(), guild.clone(), 1, Duration::from_secs(1));

        queue.enqueue(join(1)).await.unwrap();
        queue.shutdown(Duration::from_secs(60)).await;

        assert_eq!(store.calls(), 1);
        assert!(guild.assigned().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_jobs_are_aborted_after_grace() {
        let store = Arc::new(FakeStore::new(StoreReply::NotFound).with_delay(Duration::from_secs(300)));
        let guild = Arc::new(FakeGuild::with_guest(900));
        let queue = queue(store, guild.clone(), 1, Duration::from_secs(600));

        queue.enqueue(join(1)).await.unwrap();
        let start = tokio::time::Instant::now();
        queue.shutdown(Duration::from_secs(2)).await;

        assert!(start.elapsed() < Duration::from_secs(300));
        assert!(guild.assigned().is_empty());
    }
}
