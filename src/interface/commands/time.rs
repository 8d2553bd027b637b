//! # Time Command
//!
//! Replies with the current UTC time, e.g. `Monday, 02 January, 2006 15:04:05`.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::traits::ChatProvider;
use crate::strings::messages::TIME_FORMAT;

pub fn format_utc(now: DateTime<Utc>) -> String {
    now.format(TIME_FORMAT).to_string()
}

pub async fn handle_time<C>(chat: &C, channel_id: u64, now: DateTime<Utc>) -> Result<()>
where
    C: ChatProvider + ?Sized,
{
    chat.send_message(channel_id, &format_utc(now)).await
}
