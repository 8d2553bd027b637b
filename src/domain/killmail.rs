//! # Killmail Types
//!
//! ESI killmail body, the RedisQ pointer that references it, and the
//! name references returned by `/universe/names/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier to name reference, rebuilt per killmail.
pub type NameMap = HashMap<i32, NameRef>;

/// Affiliation shared by the victim and every attacker.
/// NPC attackers and structures leave the character id out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Victim {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default)]
    pub damage_taken: i32,
    #[serde(default)]
    pub ship_type_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attacker {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default)]
    pub damage_done: i32,
    #[serde(default)]
    pub final_blow: bool,
    #[serde(default)]
    pub security_status: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_type_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Killmail {
    pub killmail_id: i32,
    pub killmail_time: DateTime<Utc>,
    pub solar_system_id: i32,
    pub victim: Victim,
    #[serde(default)]
    pub attackers: Vec<Attacker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_id: Option<i32>,
}

impl Killmail {
    /// The attacker credited with the kill, if the mail names one.
    pub fn final_blow(&self) -> Option<&Attacker> {
        self.attackers.iter().find(|a| a.final_blow)
    }
}

/// zKillboard data attached to a relay package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZkbPointer {
    /// Filled in from the enclosing package, not the `zkb` object.
    #[serde(skip)]
    pub kill_id: i32,
    #[serde(rename = "locationID", default)]
    pub location_id: f64,
    #[serde(rename = "fittedValue", default)]
    pub fitted_value: f64,
    #[serde(rename = "totalValue", default)]
    pub total_value: f64,
    #[serde(default)]
    pub href: String,
}

impl ZkbPointer {
    pub fn is_empty(&self) -> bool {
        self.href.trim().is_empty()
    }
}

/// One entry of the `/universe/names/` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub category: String,
    pub id: i32,
    pub name: String,
}
