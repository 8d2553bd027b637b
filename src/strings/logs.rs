pub const STARTING_AURA: &str = "Starting Aura...";
pub const STARTING_KILLBOT: &str = "Starting Killbot...";
pub const SHUTDOWN: &str = "Shutting down...";

pub fn connected_as(name: &str, guilds: usize) -> String {
    format!("Connected as {name} ({guilds} guilds)")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn route_failed(err: &str) -> String {
    format!("Failed to route message: {err}")
}

pub fn member_joined(user_id: u64, guild_id: u64) -> String {
    format!("Member {user_id} joined guild {guild_id}")
}

pub fn enqueue_failed(user_id: u64, err: &str) -> String {
    format!("Dropped join of member {user_id}: {err}")
}

pub fn member_linked(user_id: u64) -> String {
    format!("Member {user_id} has a linked account")
}

pub fn member_unlinked(user_id: u64) -> String {
    format!("No linked account for member {user_id}")
}

pub fn member_mismatch(user_id: u64, record_id: &str) -> String {
    format!("Record for member {user_id} belongs to '{record_id}'")
}

pub fn lookup_failed(user_id: u64, err: &str) -> String {
    format!("Record lookup for member {user_id} failed: {err}")
}

pub fn roles_failed(guild_id: u64, err: &str) -> String {
    format!("Error getting roles of guild {guild_id}, skipping assignment: {err}")
}

pub fn guest_role_missing(guild_id: u64, role: &str) -> String {
    format!("Guild {guild_id} has no role named '{role}'")
}

pub fn guest_assigned(user_id: u64, role: &str) -> String {
    format!("Assigned '{role}' to member {user_id}")
}

pub fn assign_failed(user_id: u64, err: &str) -> String {
    format!("Failed to assign role to member {user_id}: {err}")
}

pub fn job_timed_out(user_id: u64, secs: u64) -> String {
    format!("Join handling for member {user_id} timed out after {secs}s")
}

pub fn poll_failed(err: &str) -> String {
    format!("Invalid response from RedisQ: {err}")
}

pub fn killmail_failed(href: &str, err: &str) -> String {
    format!("Unable to get killmail {href}: {err}")
}

pub fn names_failed(err: &str) -> String {
    format!("Unable to get killmail names, continuing without them: {err}")
}

pub fn notify_failed(err: &str) -> String {
    format!("Failed to post kill notification: {err}")
}

pub fn kill_processed(kill_id: i32, ids: usize) -> String {
    format!("Processed kill {kill_id} ({ids} names requested)")
}
