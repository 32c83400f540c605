//! Stat & skill model.
//!
//! Plain value types consumed by every other subsystem:
//!
//! - [`EntityStats`]: health/resource maximums, attack/defense pairs, chances, speed
//! - [`SkillStats`]: damage type, power (negative heals), resource cost, target group
//! - [`DamageType`]: bitmask over the fixed set of damage types, shared by skills
//!   and by entity weakness/resist masks
//!
//! No logic beyond validation lives here; formulas are in [`crate::combat`].

mod damage_type;
mod entity;
mod skill;

pub use damage_type::DamageType;
pub use entity::{EntityStats, StatsError};
pub use skill::{SkillDefinition, SkillStats};
