//! # Interface Layer
//!
//! Entry points users touch: the command-line options of both binaries and the chat command handlers.

pub mod cli;
pub mod commands;
