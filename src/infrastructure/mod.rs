//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, RecordStore, KillFeed).

pub mod discord;
pub mod esi;
pub mod firebase;
pub mod http;
pub mod redisq;
pub mod webhook;
