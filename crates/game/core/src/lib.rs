//! Deterministic battle rules and data types shared across hosts.
//!
//! `battle-core` defines the canonical rules (targeting, turn order, damage
//! resolution, the round state machine and the spawn registry) and exposes
//! pure APIs that can be reused by the async runtime, offline tools and tests.
//! All roster mutation during a battle flows through [`engine::BattleEngine`],
//! and every random draw comes from an injected [`env::RngOracle`].
pub mod arena;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod stats;
pub mod targeting;

pub use arena::{Arena, ArenaDefinition, Region, SlotDefinition, SlotId, SpawnError, SpawnSlot};
pub use combat::{
    DamageRoll, HitFlags, MoveOutcome, Resolution, base_damage, calculate_damage,
    calculate_heal, resolve_move,
};
pub use config::{BattleConfig, HealScaling, TurnOrderPolicy};
pub use engine::{
    BattleEngine, BattleOutcome, BattlePhase, MoveError, turn_order, weighted_order,
};
pub use env::{
    BattleEnv, CatalogSnapshot, ConfigError, EntityDefinition, EntityOracle, PcgRng, RngOracle,
    SequenceRng, SkillOracle, compute_seed,
};
pub use error::{BattleError, ErrorSeverity};
pub use events::BattleEvent;
pub use state::{BattleEntity, EntityId, Faction, MoveIntent, Roster};
pub use stats::{DamageType, EntityStats, SkillDefinition, SkillStats, StatsError};
pub use targeting::{TargetGroup, TargetingError, candidates, require_candidates};
