//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes the ready banner, the time layout, and the kill notification labels.

pub const READY: &str = "Aura has started! All systems green.";

/// chrono layout for the `!time` reply.
pub const TIME_FORMAT: &str = "%A, %d %B, %Y %H:%M:%S";

pub const GUEST_AUDIT_REASON: &str = "No linked account found";

pub const UNKNOWN_NAME: &str = "Unknown";

pub fn kill_title(ship: &str, system: &str) -> String {
    format!("{ship} destroyed in {system}")
}

pub fn kill_footer(killmail_id: i32) -> String {
    format!("Killmail {killmail_id}")
}

pub fn pilot_with_corp(pilot: &str, corporation: &str) -> String {
    format!("{pilot} ({corporation})")
}

pub fn final_blow(pilot: &str, ship: &str) -> String {
    format!("{pilot} ({ship})")
}
