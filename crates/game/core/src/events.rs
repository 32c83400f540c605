//! Events reported by the battle engine.
//!
//! The engine never calls out to observers. It appends events to an internal
//! buffer that the host drains after each step and forwards wherever it likes.

use crate::combat::HitFlags;
use crate::state::EntityId;

/// Something that happened during a battle, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    MoveChosen {
        source: EntityId,
        skill: String,
        target: EntityId,
    },
    /// A damaging skill resolved. `amount` is 0 when the target dodged.
    DamageResolved {
        source: EntityId,
        target: EntityId,
        skill: String,
        amount: f32,
        flags: HitFlags,
    },
    Healed {
        source: EntityId,
        target: EntityId,
        skill: String,
        amount: f32,
    },
    ResourceSpent {
        source: EntityId,
        amount: f32,
    },
    EntityDied {
        entity: EntityId,
    },
    BattleWon {
        round: u32,
    },
    BattleLost {
        round: u32,
    },
}

impl BattleEvent {
    /// True for the two events that end a battle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::BattleWon { .. } | Self::BattleLost { .. })
    }

    /// Stable snake_case name, handy for log fields and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoundStarted { .. } => "round_started",
            Self::MoveChosen { .. } => "move_chosen",
            Self::DamageResolved { .. } => "damage_resolved",
            Self::Healed { .. } => "healed",
            Self::ResourceSpent { .. } => "resource_spent",
            Self::EntityDied { .. } => "entity_died",
            Self::BattleWon { .. } => "battle_won",
            Self::BattleLost { .. } => "battle_lost",
        }
    }
}
