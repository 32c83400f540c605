//! Resolution result types.

use crate::events::BattleEvent;
use crate::state::EntityId;

bitflags::bitflags! {
    /// Modifiers that applied to a damaging move.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct HitFlags: u8 {
        const DODGED   = 1 << 0;
        const CRIT     = 1 << 1;
        const WEAKNESS = 1 << 2;
        const RESISTED = 1 << 3;
    }
}

/// What a move did to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// Damage as rolled, before clamping to the target's remaining health.
    Damage { amount: f32, flags: HitFlags },
    /// Health restored as computed, before clamping to max health.
    Heal { amount: f32 },
}

/// Result of resolving one move against the roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub source: EntityId,
    pub target: EntityId,
    pub skill: String,
    pub outcome: MoveOutcome,
    /// Health change actually applied after clamping (negative for damage).
    pub applied: f32,
    /// Resource actually deducted from the source after clamping.
    pub resource_spent: f32,
    /// True if this move took the target from alive to dead.
    pub target_died: bool,
}

impl Resolution {
    pub fn was_dodged(&self) -> bool {
        matches!(self.outcome, MoveOutcome::Damage { flags, .. } if flags.contains(HitFlags::DODGED))
    }

    /// Events describing this resolution, in emission order.
    ///
    /// The resource event is always present, even when nothing was spent, so
    /// observers can rely on one per resolved move.
    pub fn events(&self) -> Vec<BattleEvent> {
        let mut events = Vec::with_capacity(3);
        events.push(match self.outcome {
            MoveOutcome::Damage { amount, flags } => BattleEvent::DamageResolved {
                source: self.source,
                target: self.target,
                skill: self.skill.clone(),
                amount,
                flags,
            },
            MoveOutcome::Heal { amount } => BattleEvent::Healed {
                source: self.source,
                target: self.target,
                skill: self.skill.clone(),
                amount,
            },
        });
        events.push(BattleEvent::ResourceSpent {
            source: self.source,
            amount: self.resource_spent,
        });
        if self.target_died {
            events.push(BattleEvent::EntityDied {
                entity: self.target,
            });
        }
        events
    }
}
