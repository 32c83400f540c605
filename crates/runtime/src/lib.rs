//! Async orchestration for turn-based battles.
//!
//! This crate wires together the move provider abstraction, catalog oracles,
//! encounter setup and the event bus into a cohesive runtime API. Consumers
//! build a [`BattleContext`] (usually through [`EncounterBuilder`]), hand it
//! to [`BattleRuntime`] together with move providers, and await the outcome
//! while subscribing to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus and narrative rendering
//! - [`providers`] holds AI, scripted and player-backed move providers
//! - [`oracle`] adapts static content to `battle-core` oracle traits
//! - [`context`] and [`encounter`] place entities into arenas before a battle
pub mod api;
pub mod context;
pub mod encounter;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod runtime;

pub use api::{
    MoveChoice, MoveProvider, ProviderKind, Result, RuntimeError, SelectionContext,
};
pub use context::BattleContext;
pub use encounter::EncounterBuilder;
pub use events::{Event, EventBus, Topic, describe};
pub use oracle::{BattleCatalog, EntityOracleImpl, SkillOracleImpl};
pub use providers::{
    FnProvider, MoveRequest, PlayerInputHandle, PlayerProxy, RandomAi, ScriptedProvider,
    TargetPolicy, choose_random_move, player_channel,
};
pub use runtime::{AbortHandle, BattleReport, BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
