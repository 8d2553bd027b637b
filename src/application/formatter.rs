//! # Kill Notification Formatter
//!
//! Builds the webhook payload for one killmail from its resolved names.
//! Ids without a resolved name render as "Unknown".

use crate::domain::killmail::{Killmail, NameMap, ZkbPointer};
use crate::domain::notification::{
    Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, WebhookMessage,
};
use crate::strings::messages;

const ZKILLBOARD_KILL_URL: &str = "https://zkillboard.com/kill";
const IMAGE_SERVER: &str = "https://images.evetech.net";
const KILL_COLOR: u32 = 0xB0_3A_2E;

/// Sender identity shown on the webhook message.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

pub fn build_notification(
    killmail: &Killmail,
    pointer: &ZkbPointer,
    names: &NameMap,
    options: &FormatOptions,
) -> WebhookMessage {
    let name = |id: Option<i32>| name_of(names, id);
    let victim = &killmail.victim;
    let kill_id = if pointer.kill_id != 0 {
        pointer.kill_id
    } else {
        killmail.killmail_id
    };

    let system = name(Some(killmail.solar_system_id));
    let ship = name(Some(victim.ship_type_id));
    let pilot = name(victim.entity.character_id);
    let corporation = name(victim.entity.corporation_id);

    let mut fields = vec![
        EmbedField::new("Victim", messages::pilot_with_corp(&pilot, &corporation), false),
        EmbedField::new("System", system.clone(), true),
        EmbedField::new("Value", format_isk(pointer.total_value), true),
        EmbedField::new("Damage Taken", victim.damage_taken.to_string(), true),
    ];

    if let Some(attacker) = killmail.final_blow() {
        let pilot = match attacker.entity.character_id {
            Some(_) => name(attacker.entity.character_id),
            None => name(attacker.entity.corporation_id),
        };
        fields.push(EmbedField::new(
            "Final Blow",
            messages::final_blow(&pilot, &name(attacker.ship_type_id)),
            false,
        ));
    }
    fields.push(EmbedField::new("Attackers", killmail.attackers.len().to_string(), true));

    let author = victim.entity.character_id.filter(|id| *id != 0).map(|id| EmbedAuthor {
        name: pilot.clone(),
        url: None,
        icon_url: Some(format!("{IMAGE_SERVER}/characters/{id}/portrait?size=64")),
    });

    let thumbnail = (victim.ship_type_id != 0).then(|| EmbedImage {
        url: format!("{IMAGE_SERVER}/types/{}/render?size=128", victim.ship_type_id),
    });

    let embed = Embed {
        title: Some(messages::kill_title(&ship, &system)),
        description: None,
        url: Some(format!("{ZKILLBOARD_KILL_URL}/{kill_id}/")),
        timestamp: Some(killmail.killmail_time.to_rfc3339()),
        color: Some(KILL_COLOR),
        footer: Some(EmbedFooter {
            text: messages::kill_footer(killmail.killmail_id),
            icon_url: None,
        }),
        thumbnail,
        author,
        fields,
    };

    WebhookMessage {
        content: None,
        username: options.username.clone(),
        avatar_url: options.avatar_url.clone(),
        tts: false,
        embeds: vec![embed],
    }
}

fn name_of(names: &NameMap, id: Option<i32>) -> String {
    id.and_then(|id| names.get(&id))
        .map(|n| n.name.clone())
        .unwrap_or_else(|| messages::UNKNOWN_NAME.to_string())
}

/// Short ISK amount, e.g. `1.25b ISK`.
pub fn format_isk(value: f64) -> String {
    const UNITS: [(f64, &str); 5] = [(1.0, ""), (1e3, "k"), (1e6, "m"), (1e9, "b"), (1e12, "t")];

    let magnitude = value.abs();
    let mut unit = UNITS
        .iter()
        .rposition(|(scale, _)| magnitude >= *scale)
        .unwrap_or(0);

    // 999.999k would round to 1000.00k
    if unit + 1 < UNITS.len() && (magnitude / UNITS[unit].0 * 100.0).round() >= 100_000.0 {
        unit += 1;
    }

    let (scale, suffix) = UNITS[unit];
    format!("{:.2}{} ISK", value / scale, suffix)
}
