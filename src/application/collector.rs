//! # Id Collector
//!
//! Gathers every entity id a killmail references so each is resolved once.
//! Zero and absent ids are skipped. The set is ordered, which keeps the
//! outgoing name request deterministic.

use std::collections::BTreeSet;

use crate::domain::killmail::Killmail;

pub fn collect_ids(killmail: &Killmail) -> BTreeSet<i32> {
    let victim = &killmail.victim;
    let mut ids = BTreeSet::new();

    let candidates = [
        victim.entity.character_id,
        Some(victim.ship_type_id),
        victim.entity.corporation_id,
        Some(killmail.solar_system_id),
    ]
    .into_iter()
    .chain(killmail.attackers.iter().flat_map(|attacker| {
        [
            attacker.entity.character_id,
            attacker.ship_type_id,
            attacker.entity.corporation_id,
            attacker.entity.alliance_id,
        ]
    }));

    for id in candidates.flatten() {
        if id != 0 {
            ids.insert(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::killmail::{Attacker, Entity, Victim};
    use chrono::Utc;

    fn entity(character: i32, corporation: i32, alliance: Option<i32>) -> Entity {
        Entity {
            character_id: Some(character),
            corporation_id: Some(corporation),
            alliance_id: alliance,
            faction_id: None,
        }
    }

    fn attacker(entity: Entity, ship: Option<i32>) -> Attacker {
        Attacker {
            entity,
            ship_type_id: ship,
            final_blow: false,
            ..Default::default()
        }
    }

    fn killmail(victim: Victim, attackers: Vec<Attacker>) -> Killmail {
        Killmail {
            killmail_id: 1,
            killmail_time: Utc::now(),
            solar_system_id: 30000142,
            victim,
            attackers,
            moon_id: None,
            war_id: None,
        }
    }

    #[test]
    fn test_repeated_ids_collapse() {
        let km = killmail(
            Victim {
                entity: entity(100, 300, None),
                ship_type_id: 200,
                damage_taken: 10,
            },
            vec![attacker(entity(400, 300, Some(500)), Some(200))],
        );

        let ids: Vec<i32> = collect_ids(&km).into_iter().collect();
        assert_eq!(ids, vec![100, 200, 300, 400, 500, 30000142]);
    }

    #[test]
    fn test_absent_and_zero_ids_are_skipped() {
        let npc = Attacker {
            entity: Entity {
                character_id: None,
                corporation_id: Some(1000125),
                alliance_id: Some(0),
                faction_id: Some(500004),
            },
            ship_type_id: None,
            ..Default::default()
        };
        let km = killmail(
            Victim {
                entity: Entity {
                    character_id: None,
                    corporation_id: Some(98000001),
                    alliance_id: None,
                    faction_id: None,
                },
                ship_type_id: 35832,
                damage_taken: 0,
            },
            vec![npc],
        );

        let ids = collect_ids(&km);
        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&0));
        assert!(ids.contains(&1000125));
        assert!(ids.contains(&35832));
        // factions are not part of the set
        assert!(!ids.contains(&500004));
    }

    #[test]
    fn test_victim_alliance_is_not_collected() {
        let km = killmail(
            Victim {
                entity: entity(100, 300, Some(600)),
                ship_type_id: 200,
                damage_taken: 1,
            },
            vec![],
        );
        let ids = collect_ids(&km);
        assert!(!ids.contains(&600));
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_exact_union_over_many_attackers() {
        let attackers: Vec<Attacker> = (0..50)
            .map(|i| attacker(entity(1000 + i % 5, 2000 + i % 3, Some(3000 + i % 2)), Some(4000 + i % 4)))
            .collect();
        let km = killmail(
            Victim {
                entity: entity(1, 2, None),
                ship_type_id: 3,
                damage_taken: 1,
            },
            attackers,
        );

        let ids = collect_ids(&km);
        // victim 3 + system 1 + 5 pilots + 3 corps + 2 alliances + 4 ships
        assert_eq!(ids.len(), 18);
        let expected: BTreeSet<i32> = [1, 2, 3, 30000142]
            .into_iter()
            .chain(1000..1005)
            .chain(2000..2003)
            .chain(3000..3002)
            .chain(4000..4004)
            .collect();
        assert_eq!(ids, expected);
    }
}
