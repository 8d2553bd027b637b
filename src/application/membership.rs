//! # Membership Handler
//!
//! Decides whether a newly joined member gets the Guest role.
//! A member keeps no role only when the store holds a record whose id matches them;
//! not-found, mismatched ids and failed lookups all lead to Guest.
//! A failed role listing aborts the assignment instead of applying an empty role set.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::config::AuraConfig;
use crate::domain::traits::{GuildDirectory, RecordStore};
use crate::domain::types::MemberJoin;
use crate::strings::logs;

/// What happened to one joined member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberOutcome {
    Linked,
    GuestAssigned { role_id: u64 },
    GuestRoleMissing,
    RolesUnavailable,
    AssignFailed,
}

pub struct MembershipHandler {
    store: Arc<dyn RecordStore>,
    guild: Arc<dyn GuildDirectory>,
    guest_role: String,
    lookup_delay: Duration,
}

impl MembershipHandler {
    pub fn new(
        store: Arc<dyn RecordStore>,
        guild: Arc<dyn GuildDirectory>,
        guest_role: impl Into<String>,
        lookup_delay: Duration,
    ) -> Self {
        Self {
            store,
            guild,
            guest_role: guest_role.into(),
            lookup_delay,
        }
    }

    pub fn from_config(
        store: Arc<dyn RecordStore>,
        guild: Arc<dyn GuildDirectory>,
        config: &AuraConfig,
    ) -> Self {
        Self::new(store, guild, config.guest_role.clone(), config.lookup_delay())
    }

    pub async fn handle(&self, join: MemberJoin) -> MemberOutcome {
        // Records written moments before the join may not be readable yet.
        if !self.lookup_delay.is_zero() {
            tokio::time::sleep(self.lookup_delay).await;
        }

        if self.is_linked(join.user_id).await {
            tracing::info!("{}", logs::member_linked(join.user_id));
            return MemberOutcome::Linked;
        }

        self.assign_guest(join).await
    }

    async fn is_linked(&self, user_id: u64) -> bool {
        match self.store.user_record(user_id).await {
            Ok(Some(record)) if record.is_linked_to(user_id) => true,
            Ok(Some(record)) => {
                tracing::warn!("{}", logs::member_mismatch(user_id, &record.id));
                false
            }
            Ok(None) => {
                tracing::info!("{}", logs::member_unlinked(user_id));
                false
            }
            Err(e) => {
                tracing::error!("{}", logs::lookup_failed(user_id, &e.to_string()));
                false
            }
        }
    }

    async fn assign_guest(&self, join: MemberJoin) -> MemberOutcome {
        let roles = match self.guild.guild_roles(join.guild_id).await {
            Ok(roles) => roles,
            Err(e) => {
                tracing::error!("{}", logs::roles_failed(join.guild_id, &e.to_string()));
                return MemberOutcome::RolesUnavailable;
            }
        };

        let Some(role) = roles.iter().find(|r| r.name == self.guest_role) else {
            tracing::warn!("{}", logs::guest_role_missing(join.guild_id, &self.guest_role));
            return MemberOutcome::GuestRoleMissing;
        };

        match self
            .guild
            .add_member_role(join.guild_id, join.user_id, role.id)
            .await
        {
            Ok(()) => {
                tracing::info!("{}", logs::guest_assigned(join.user_id, &self.guest_role));
                MemberOutcome::GuestAssigned { role_id: role.id }
            }
            Err(e) => {
                tracing::error!("{}", logs::assign_failed(join.user_id, &e.to_string()));
                MemberOutcome::AssignFailed
            }
        }
    }
}
