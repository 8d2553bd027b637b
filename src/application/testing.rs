//! In-process fakes for the domain traits, shared by the unit tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::error::ServiceError;
use crate::domain::traits::{ChatProvider, GuildDirectory, RecordStore};
use crate::domain::types::{GuildRole, UserRecord};

#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<(u64, String)>>,
    fail: bool,
}

impl RecordingChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(u64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<()> {
        if self.fail {
            return Err(anyhow!("Missing Access"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, content.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum StoreReply {
    /// A record whose `id` is the given string.
    Record(&'static str),
    NotFound,
    Fail,
}

/// Record store that answers every lookup the same way, optionally slowly,
/// and tracks how many lookups run at once.
pub struct FakeStore {
    reply: StoreReply,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn new(reply: StoreReply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn user_record(&self, _user_id: u64) -> Result<Option<UserRecord>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.reply {
            StoreReply::Record(id) => Ok(Some(UserRecord {
                id: id.to_string(),
                ..Default::default()
            })),
            StoreReply::NotFound => Ok(None),
            StoreReply::Fail => Err(ServiceError::Status {
                service: "firebase",
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

pub struct FakeGuild {
    roles: Vec<GuildRole>,
    fail_roles: bool,
    fail_assign: bool,
    role_requests: AtomicUsize,
    assigned: Mutex<Vec<(u64, u64, u64)>>,
}

impl FakeGuild {
    pub fn new(roles: Vec<(u64, &str)>) -> Self {
        Self {
            roles: roles
                .into_iter()
                .map(|(id, name)| GuildRole {
                    id,
                    name: name.to_string(),
                })
                .collect(),
            fail_roles: false,
            fail_assign: false,
            role_requests: AtomicUsize::new(0),
            assigned: Mutex::new(Vec::new()),
        }
    }

    /// A guild with `@everyone`, `Member` and `Guest`.
    pub fn with_guest(guest_role_id: u64) -> Self {
        Self::new(vec![(1, "@everyone"), (2, "Member"), (guest_role_id, "Guest")])
    }

    pub fn failing_roles(mut self) -> Self {
        self.fail_roles = true;
        self
    }

    pub fn failing_assign(mut self) -> Self {
        self.fail_assign = true;
        self
    }

    pub fn assigned(&self) -> Vec<(u64, u64, u64)> {
        self.assigned.lock().unwrap().clone()
    }

    pub fn role_requests(&self) -> usize {
        self.role_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildDirectory for FakeGuild {
    async fn guild_roles(&self, _guild_id: u64) -> Result<Vec<GuildRole>> {
        self.role_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_roles {
            return Err(anyhow!("HTTP 500 while fetching roles"));
        }
        Ok(self.roles.clone())
    }

    async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()> {
        if self.fail_assign {
            return Err(anyhow!("Missing Permissions"));
        }
        self.assigned
            .lock()
            .unwrap()
            .push((guild_id, user_id, role_id));
        Ok(())
    }
}
