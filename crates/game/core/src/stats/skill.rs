//! Skill statistics and definitions.

use super::DamageType;
use crate::targeting::TargetGroup;

/// Numbers describing what a skill does.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStats {
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    /// Attack multiplier. Negative values heal.
    pub power: f32,
    /// Resource deducted from the user every time the skill resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource_cost: f32,
    pub target_group: TargetGroup,
}

impl SkillStats {
    pub const fn new(damage_type: DamageType, power: f32, target_group: TargetGroup) -> Self {
        Self {
            damage_type,
            power,
            resource_cost: 0.0,
            target_group,
        }
    }

    #[must_use]
    pub const fn with_cost(mut self, resource_cost: f32) -> Self {
        self.resource_cost = resource_cost;
        self
    }

    /// Skills with negative power restore health instead of dealing damage.
    #[inline]
    pub fn is_healing(&self) -> bool {
        self.power < 0.0
    }
}

/// A named skill as stored in the skill catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    pub stats: SkillStats,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, stats: SkillStats) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }
}
