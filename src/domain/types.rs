//! # Domain Types
//!
//! Bot-side data structures: the linked-account record read from the store
//! and the gateway events the handlers consume.

use serde::{Deserialize, Serialize};

/// Linked account stored under `discord/<userId>`.
/// Owned by the external store; Aura only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub id: String,
    pub account_id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub token_type: String,
    pub expires_at: u64,
    pub username: String,
}

impl UserRecord {
    /// True when the record belongs to the given Discord user.
    pub fn is_linked_to(&self, user_id: u64) -> bool {
        !self.id.is_empty() && self.id == user_id.to_string()
    }
}

/// A role as listed by the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    pub id: u64,
    pub name: String,
}

/// A member joined a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberJoin {
    pub guild_id: u64,
    pub user_id: u64,
}

/// A chat message received from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub author_id: u64,
    pub channel_id: u64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_decodes_camel_case() {
        let json = r#"{
            "id": "1234",
            "accountId": "acc-1",
            "email": "pilot@example.com",
            "accessToken": "a",
            "refreshToken": "r",
            "scope": "identify",
            "tokenType": "Bearer",
            "expiresAt": 1700000000,
            "username": "pilot"
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1234");
        assert_eq!(record.account_id, "acc-1");
        assert_eq!(record.expires_at, 1_700_000_000);
        assert!(record.is_linked_to(1234));
        assert!(!record.is_linked_to(99));
    }

    #[test]
    fn test_partial_record_is_not_linked() {
        let record: UserRecord = serde_json::from_str(r#"{"username": "pilot"}"#).unwrap();
        assert!(record.id.is_empty());
        assert!(!record.is_linked_to(0));
    }
}
