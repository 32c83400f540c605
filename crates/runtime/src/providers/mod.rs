//! Move provider implementations for different kinds of combatants.

pub mod ai;
pub mod player;
pub mod scripted;

pub use ai::{FnProvider, RandomAi, TargetPolicy, choose_random_move};
pub use player::{MoveRequest, PlayerInputHandle, PlayerProxy, player_channel};
pub use scripted::ScriptedProvider;
