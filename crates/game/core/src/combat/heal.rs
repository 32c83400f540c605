//! Healing calculation.

use crate::config::{BattleConfig, HealScaling};
use crate::stats::{EntityStats, SkillStats};

/// Health restored by a skill with negative power.
///
/// Heals roll neither dodge nor crit. The result is never negative; a
/// non-healing skill yields 0.
pub fn calculate_heal(source: &EntityStats, skill: &SkillStats, config: &BattleConfig) -> f32 {
    if !skill.is_healing() {
        return 0.0;
    }
    let magnitude = -skill.power;
    let amount = match config.heal_scaling {
        HealScaling::Flat => magnitude,
        HealScaling::MagicAttack => magnitude * source.magic_attack,
    };
    amount.max(0.0)
}
