//! Damage calculation.

use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::stats::{EntityStats, SkillStats};

use super::HitFlags;
use super::hit::{roll_crit, roll_dodge};

/// Damage produced by one roll, before it is applied to the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub amount: f32,
    pub flags: HitFlags,
}

/// Deterministic part of the damage formula.
///
/// # Formula
///
/// ```text
/// (atk, def) = (strength, defense)           if skill type is exactly PHYSICAL
///            = (magic_attack, magic_defense)  otherwise
/// weakness   = weakness_bonus  if skill type overlaps target.weakness else 0
/// resist     = resist_penalty  if skill type overlaps target.resist   else 0
/// damage     = max(power * atk - def + weakness - resist, minimum_damage)
/// ```
///
/// Weakness and resistance are flat terms, not multipliers. Returns the damage
/// with `WEAKNESS` / `RESISTED` flags set as they applied.
pub fn base_damage(
    source: &EntityStats,
    target: &EntityStats,
    skill: &SkillStats,
    config: &BattleConfig,
) -> DamageRoll {
    let (atk, def) = if skill.damage_type.is_physical() {
        (source.strength, target.defense)
    } else {
        (source.magic_attack, target.magic_defense)
    };

    let mut flags = HitFlags::empty();
    let mut raw = skill.power * atk - def;
    if skill.damage_type.matches(target.weakness) {
        raw += config.weakness_bonus;
        flags |= HitFlags::WEAKNESS;
    }
    if skill.damage_type.matches(target.resist) {
        raw -= config.resist_penalty;
        flags |= HitFlags::RESISTED;
    }

    DamageRoll {
        amount: raw.max(config.minimum_damage),
        flags,
    }
}

/// Full damage roll: dodge, then base damage, then crit.
///
/// Draws the dodge roll first and the crit roll second. A dodged move consumes
/// only the dodge roll and deals 0.
pub fn calculate_damage(
    source: &EntityStats,
    target: &EntityStats,
    skill: &SkillStats,
    rng: &mut (impl RngOracle + ?Sized),
    config: &BattleConfig,
) -> DamageRoll {
    if roll_dodge(target, rng) {
        return DamageRoll {
            amount: 0.0,
            flags: HitFlags::DODGED,
        };
    }

    let mut roll = base_damage(source, target, skill, config);
    if roll_crit(target, rng) {
        roll.amount *= config.crit_multiplier;
        roll.flags |= HitFlags::CRIT;
    }
    roll
}
