//! # Application Layer
//!
//! Orchestration of both bots: command routing, membership handling and its queue,
//! and the killmail pipeline (collect, resolve, format, poll loop).

pub mod collector;
pub mod formatter;
pub mod killfeed;
pub mod logging;
pub mod member_queue;
pub mod membership;
pub mod resolver;
pub mod router;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod testing;
