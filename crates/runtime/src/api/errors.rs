//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the battle engine, spawning and move providers so
//! clients can bubble them up with consistent context.
use std::fmt;

use battle_core::{BattleError, ConfigError, EntityId, ErrorSeverity, MoveError, SpawnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} move provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("runtime requires a battle context before building")]
    MissingContext,

    #[error("player input channel closed")]
    PlayerChannelClosed,

    #[error("battle aborted during round {round}")]
    Aborted { round: u32 },

    #[error("battle did not finish within {limit} rounds")]
    RoundLimitReached { limit: u32 },

    #[error("AI policy chose an invalid move for {actor}")]
    AiPolicy {
        actor: EntityId,
        #[source]
        source: MoveError,
    },

    #[error("{actor} gave no valid move after {attempts} attempts")]
    AttemptsExhausted {
        actor: EntityId,
        attempts: u32,
        #[source]
        source: MoveError,
    },

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            Aborted { .. } | AttemptsExhausted { .. } => ErrorSeverity::Recoverable,
            RoundLimitReached { .. } => ErrorSeverity::Validation,
            ProviderNotSet { .. } | MissingContext | PlayerChannelClosed => ErrorSeverity::Internal,
            AiPolicy { .. } => ErrorSeverity::Fatal,
            Move(err) => err.severity(),
            Config(err) => err.severity(),
            Spawn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            MissingContext => "RUNTIME_MISSING_CONTEXT",
            PlayerChannelClosed => "RUNTIME_PLAYER_CHANNEL_CLOSED",
            Aborted { .. } => "RUNTIME_ABORTED",
            RoundLimitReached { .. } => "RUNTIME_ROUND_LIMIT",
            AiPolicy { .. } => "RUNTIME_AI_POLICY",
            AttemptsExhausted { .. } => "RUNTIME_ATTEMPTS_EXHAUSTED",
            Move(err) => err.error_code(),
            Config(err) => err.error_code(),
            Spawn(err) => err.error_code(),
        }
    }
}

/// Who is behind a move provider.
///
/// Player moves that fail validation are sent back for another try; AI moves
/// that fail validation are a defect in the policy and end the battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Ai,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Ai => "ai",
        };
        write!(f, "{}", label)
    }
}
