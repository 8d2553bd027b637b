//! # Domain Layer
//!
//! Core definitions, types, and traits shared by both tools.
//! Independent of the Discord client, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod killmail;
pub mod notification;
pub mod traits;
pub mod types;
