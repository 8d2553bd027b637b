//! # New Eden bots
//!
//! Shared library behind the two binaries:
//! - `aura`: Discord bot that answers `!time` and gives unlinked members the Guest role
//! - `killbot`: zKillboard relay consumer that posts kill notifications
//!
//! Layers follow the same split in both:
//! - Domain: configuration, records, killmail and notification types, trait seams
//! - Infrastructure: Discord, Firebase, RedisQ, ESI, webhook clients
//! - Application: routing, membership queue, killmail pipeline, logging
//! - Interface: CLI options and command handlers

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod strings;
