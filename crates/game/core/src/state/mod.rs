//! Mutable battle state.
//!
//! This module owns the data structures that describe combatants, the roster
//! they live in, and the per-round move intents. Runtime layers clone or query
//! this state but mutate it exclusively through [`crate::engine::BattleEngine`].
mod entity;
mod intent;
mod roster;

pub use entity::{BattleEntity, EntityId, Faction};
pub use intent::MoveIntent;
pub use roster::Roster;
