//! # Command Handlers
//!
//! Contains specific handler functions for each supported chat command.
//! These handlers are invoked by the Router.

pub mod time;
