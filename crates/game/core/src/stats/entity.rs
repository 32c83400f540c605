//! Entity statistics.

use super::DamageType;

/// Static statistics of a battle entity.
///
/// Stats are copied into each [`crate::state::BattleEntity`] at spawn time and never
/// mutate during a battle; only current health and resource change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityStats {
    pub max_health: f32,
    pub max_resource: f32,
    /// Physical attack.
    pub strength: f32,
    /// Physical defense.
    pub defense: f32,
    pub magic_attack: f32,
    pub magic_defense: f32,
    /// Probability in `[0, 1]`.
    pub crit_chance: f32,
    /// Probability in `[0, 1]`.
    pub dodge_chance: f32,
    /// Turn-order weight. Zero disables weighted ordering for the whole battle.
    pub speed: f32,
    pub weakness: DamageType,
    pub resist: DamageType,
}

/// A stat value outside its allowed range.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("stat '{field}' has invalid value {value}")]
pub struct StatsError {
    pub field: &'static str,
    pub value: f32,
}

impl EntityStats {
    /// Creates stats with the given pools and every other value zeroed.
    pub const fn new(max_health: f32, max_resource: f32) -> Self {
        Self {
            max_health,
            max_resource,
            strength: 0.0,
            defense: 0.0,
            magic_attack: 0.0,
            magic_defense: 0.0,
            crit_chance: 0.0,
            dodge_chance: 0.0,
            speed: 0.0,
            weakness: DamageType::empty(),
            resist: DamageType::empty(),
        }
    }

    #[must_use]
    pub const fn with_physical(mut self, strength: f32, defense: f32) -> Self {
        self.strength = strength;
        self.defense = defense;
        self
    }

    #[must_use]
    pub const fn with_magic(mut self, magic_attack: f32, magic_defense: f32) -> Self {
        self.magic_attack = magic_attack;
        self.magic_defense = magic_defense;
        self
    }

    #[must_use]
    pub const fn with_chances(mut self, crit_chance: f32, dodge_chance: f32) -> Self {
        self.crit_chance = crit_chance;
        self.dodge_chance = dodge_chance;
        self
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn with_affinities(mut self, weakness: DamageType, resist: DamageType) -> Self {
        self.weakness = weakness;
        self.resist = resist;
        self
    }

    /// Checks the documented ranges: chances in `[0, 1]`, everything else finite
    /// and non-negative except attack/defense values which only need to be finite.
    pub fn validate(&self) -> Result<(), StatsError> {
        let non_negative = [
            ("max_health", self.max_health),
            ("max_resource", self.max_resource),
            ("speed", self.speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(StatsError { field, value });
            }
        }

        let chances = [
            ("crit_chance", self.crit_chance),
            ("dodge_chance", self.dodge_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(StatsError { field, value });
            }
        }

        let finite = [
            ("strength", self.strength),
            ("defense", self.defense),
            ("magic_attack", self.magic_attack),
            ("magic_defense", self.magic_defense),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(StatsError { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let stats = EntityStats::new(100.0, 30.0)
            .with_physical(12.0, 4.0)
            .with_magic(8.0, 6.0)
            .with_chances(0.1, 0.05)
            .with_speed(7.0)
            .with_affinities(DamageType::FIRE, DamageType::COLD);

        assert_eq!(stats.max_health, 100.0);
        assert_eq!(stats.strength, 12.0);
        assert_eq!(stats.magic_defense, 6.0);
        assert_eq!(stats.dodge_chance, 0.05);
        assert_eq!(stats.weakness, DamageType::FIRE);
        assert!(stats.validate().is_ok());
    }

    #[test]
    fn chance_outside_unit_interval_is_rejected() {
        let stats = EntityStats::new(10.0, 0.0).with_chances(1.5, 0.0);
        let err = stats.validate().unwrap_err();
        assert_eq!(err.field, "crit_chance");
    }

    #[test]
    fn negative_speed_is_rejected_but_zero_is_fine() {
        assert!(EntityStats::new(10.0, 0.0).with_speed(0.0).validate().is_ok());
        let err = EntityStats::new(10.0, 0.0)
            .with_speed(-1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "speed");
    }

    #[test]
    fn nan_chance_is_rejected() {
        let stats = EntityStats::new(10.0, 0.0).with_chances(0.0, f32::NAN);
        assert_eq!(stats.validate().unwrap_err().field, "dodge_chance");
    }
}
