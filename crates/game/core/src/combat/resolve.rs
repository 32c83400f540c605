//! Applies a single move to the roster.

use crate::config::BattleConfig;
use crate::engine::MoveError;
use crate::env::RngOracle;
use crate::state::{MoveIntent, Roster};
use crate::stats::SkillStats;

use super::damage::calculate_damage;
use super::heal::calculate_heal;
use super::result::{MoveOutcome, Resolution};

/// Resolves `intent` using `skill` and mutates the roster in place.
///
/// Steps, in order:
/// 1. Healing skills restore health with no rolls.
/// 2. Otherwise dodge, base damage and crit are rolled (see [`calculate_damage`]).
/// 3. The result is applied to the target with health clamped to `[0, max]`.
/// 4. The skill's cost is deducted from the source whatever the outcome.
///
/// Targeting is not re-checked here: a target that died earlier in the round
/// still receives the move (and stays clamped at zero health).
pub fn resolve_move(
    roster: &mut Roster,
    intent: &MoveIntent,
    skill: &SkillStats,
    rng: &mut (impl RngOracle + ?Sized),
    config: &BattleConfig,
) -> Result<Resolution, MoveError> {
    let source_stats = roster
        .get(intent.source)
        .ok_or(MoveError::UnknownEntity(intent.source))?
        .stats;
    let target = roster
        .get(intent.target)
        .ok_or(MoveError::UnknownEntity(intent.target))?;
    let target_stats = target.stats;
    let was_dead = target.is_dead();

    let (outcome, delta) = if skill.is_healing() {
        let amount = calculate_heal(&source_stats, skill, config);
        (MoveOutcome::Heal { amount }, amount)
    } else {
        let roll = calculate_damage(&source_stats, &target_stats, skill, rng, config);
        (
            MoveOutcome::Damage {
                amount: roll.amount,
                flags: roll.flags,
            },
            -roll.amount,
        )
    };

    let target = roster
        .get_mut(intent.target)
        .ok_or(MoveError::UnknownEntity(intent.target))?;
    let applied = target.apply_health_delta(delta);
    let target_died = !was_dead && target.is_dead();

    let resource_spent = roster
        .get_mut(intent.source)
        .ok_or(MoveError::UnknownEntity(intent.source))?
        .spend_resource(skill.resource_cost);

    Ok(Resolution {
        source: intent.source,
        target: intent.target,
        skill: intent.skill.clone(),
        outcome,
        applied,
        resource_spent,
        target_died,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::HitFlags;
    use crate::env::SequenceRng;
    use crate::events::BattleEvent;
    use crate::state::{BattleEntity, EntityId, Faction};
    use crate::stats::{DamageType, EntityStats};
    use crate::targeting::TargetGroup;

    const KNIGHT: EntityId = EntityId(0);
    const GOBLIN: EntityId = EntityId(1);

    fn roster(goblin_health: f32) -> Roster {
        [
            BattleEntity::new(
                KNIGHT,
                "Knight",
                Faction::Ally,
                EntityStats::new(100.0, 10.0).with_physical(20.0, 0.0),
                vec!["Slash".into()],
            ),
            BattleEntity::new(
                GOBLIN,
                "Goblin",
                Faction::Enemy,
                EntityStats::new(300.0, 0.0).with_physical(0.0, 5.0),
                vec![],
            )
            .with_health(goblin_health),
        ]
        .into_iter()
        .collect()
    }

    fn slash() -> SkillStats {
        SkillStats::new(DamageType::PHYSICAL, 10.0, TargetGroup::Enemies).with_cost(4.0)
    }

    #[test]
    fn damage_is_applied_and_cost_is_paid() {
        let mut roster = roster(300.0);
        let mut rng = SequenceRng::new(vec![0.9]);
        let intent = MoveIntent::new(KNIGHT, "Slash", GOBLIN);

        let res = resolve_move(&mut roster, &intent, &slash(), &mut rng, &BattleConfig::default())
            .unwrap();

        assert_eq!(res.applied, -195.0);
        assert_eq!(roster.get(GOBLIN).unwrap().health(), 105.0);
        assert_eq!(roster.get(KNIGHT).unwrap().resource(), 6.0);
        assert_eq!(res.resource_spent, 4.0);
        assert!(!res.target_died);
    }

    #[test]
    fn overkill_clamps_and_reports_death_once() {
        let mut roster = roster(50.0);
        let mut rng = SequenceRng::new(vec![0.9]);
        let intent = MoveIntent::new(KNIGHT, "Slash", GOBLIN);
        let config = BattleConfig::default();

        let first = resolve_move(&mut roster, &intent, &slash(), &mut rng, &config).unwrap();
        assert_eq!(first.applied, -50.0);
        assert!(first.target_died);
        assert_eq!(roster.get(GOBLIN).unwrap().health(), 0.0);

        let second = resolve_move(&mut roster, &intent, &slash(), &mut rng, &config).unwrap();
        assert_eq!(second.applied, 0.0);
        assert!(!second.target_died);
        assert!(
            !second
                .events()
                .iter()
                .any(|e| matches!(e, BattleEvent::EntityDied { .. }))
        );
    }

    #[test]
    fn dodged_move_still_costs_resource() {
        let mut roster = roster(300.0);
        roster.get_mut(GOBLIN).unwrap().stats.dodge_chance = 1.0;
        let mut rng = SequenceRng::new(vec![0.0]);
        let intent = MoveIntent::new(KNIGHT, "Slash", GOBLIN);

        let res = resolve_move(&mut roster, &intent, &slash(), &mut rng, &BattleConfig::default())
            .unwrap();

        assert!(res.was_dodged());
        assert_eq!(roster.get(GOBLIN).unwrap().health(), 300.0);
        assert_eq!(roster.get(KNIGHT).unwrap().resource(), 6.0);

        let events = res.events();
        assert!(matches!(
            events[0],
            BattleEvent::DamageResolved { amount, flags, .. } if amount == 0.0 && flags == HitFlags::DODGED
        ));
        assert!(matches!(events[1], BattleEvent::ResourceSpent { amount, .. } if amount == 4.0));
    }

    #[test]
    fn cost_beyond_pool_spends_what_is_left() {
        let mut roster = roster(300.0);
        let mut rng = SequenceRng::new(vec![0.9]);
        let intent = MoveIntent::new(KNIGHT, "Slash", GOBLIN);
        let expensive = slash().with_cost(25.0);

        let res =
            resolve_move(&mut roster, &intent, &expensive, &mut rng, &BattleConfig::default())
                .unwrap();
        assert_eq!(res.resource_spent, 10.0);
        assert_eq!(roster.get(KNIGHT).unwrap().resource(), 0.0);
    }

    #[test]
    fn heal_rolls_nothing_and_clamps_to_max() {
        let mut roster = roster(300.0);
        roster.get_mut(KNIGHT).unwrap().set_health(97.0);
        let mut rng = SequenceRng::new(vec![0.0]);
        let mend = SkillStats::new(DamageType::HOLY, -10.0, TargetGroup::Allies);
        let intent = MoveIntent::new(KNIGHT, "Mend", KNIGHT);

        let res =
            resolve_move(&mut roster, &intent, &mend, &mut rng, &BattleConfig::default()).unwrap();

        assert_eq!(res.outcome, MoveOutcome::Heal { amount: 10.0 });
        assert_eq!(res.applied, 3.0);
        assert_eq!(roster.get(KNIGHT).unwrap().health(), 100.0);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut roster = roster(300.0);
        let mut rng = SequenceRng::new(vec![0.9]);
        let intent = MoveIntent::new(KNIGHT, "Slash", EntityId(99));
        assert_eq!(
            resolve_move(&mut roster, &intent, &slash(), &mut rng, &BattleConfig::default()),
            Err(MoveError::UnknownEntity(EntityId(99)))
        );
    }
}
