//! Move resolution.
//!
//! This module turns a [`MoveIntent`](crate::state::MoveIntent) into health and
//! resource changes. Formula code is pure; the only side effects live in
//! [`resolve_move`], which mutates the roster.
//!
//! # Core Functions
//!
//! - `roll_dodge` / `roll_crit`: independent uniform draws against the target's chances
//! - `base_damage`: attack/defense pair, weakness/resist terms, minimum floor
//! - `calculate_damage`: dodge, base damage and crit combined
//! - `calculate_heal`: healing amount under the configured scaling
//! - `resolve_move`: applies one move to the roster and reports what happened

pub mod damage;
pub mod heal;
pub mod hit;
pub mod resolve;
pub mod result;

pub use damage::{DamageRoll, base_damage, calculate_damage};
pub use heal::calculate_heal;
pub use hit::{roll_crit, roll_dodge};
pub use resolve::resolve_move;
pub use result::{HitFlags, MoveOutcome, Resolution};
