/// How healing skills (negative power) turn into restored health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HealScaling {
    /// Restores exactly `|power|`.
    #[default]
    Flat,
    /// Restores `|power| * source.magic_attack`.
    MagicAttack,
}

/// When the weighted turn order is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnOrderPolicy {
    /// Drawn once when the battle starts; dead entities are skipped in place.
    #[default]
    OncePerBattle,
    /// Redrawn at the start of every round's resolution.
    EveryRound,
}

/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Flat bonus added to raw damage when the skill type hits a weakness.
    pub weakness_bonus: f32,
    /// Flat penalty subtracted from raw damage when the skill type is resisted.
    pub resist_penalty: f32,
    pub crit_multiplier: f32,
    /// Floor applied to every landed hit, even against full resist.
    pub minimum_damage: f32,
    pub heal_scaling: HealScaling,
    pub turn_order: TurnOrderPolicy,
    /// Rounds after which the battle is abandoned. `None` means no limit.
    pub round_limit: Option<u32>,
}

impl BattleConfig {
    pub const DEFAULT_WEAKNESS_BONUS: f32 = 1.5;
    pub const DEFAULT_RESIST_PENALTY: f32 = 0.75;
    pub const DEFAULT_CRIT_MULTIPLIER: f32 = 1.2;
    pub const DEFAULT_MINIMUM_DAMAGE: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            weakness_bonus: Self::DEFAULT_WEAKNESS_BONUS,
            resist_penalty: Self::DEFAULT_RESIST_PENALTY,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            heal_scaling: HealScaling::default(),
            turn_order: TurnOrderPolicy::default(),
            round_limit: None,
        }
    }

    #[must_use]
    pub fn with_heal_scaling(mut self, heal_scaling: HealScaling) -> Self {
        self.heal_scaling = heal_scaling;
        self
    }

    #[must_use]
    pub fn with_turn_order(mut self, turn_order: TurnOrderPolicy) -> Self {
        self.turn_order = turn_order;
        self
    }

    #[must_use]
    pub fn with_round_limit(mut self, round_limit: Option<u32>) -> Self {
        self.round_limit = round_limit;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
