//! Error types for move validation and round execution.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::EntityId;
use crate::targeting::TargetGroup;

use super::BattlePhase;

/// A move that cannot be accepted or resolved.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MoveError {
    #[error("{entity} does not know skill '{skill}'")]
    SkillNotInSkillset { entity: EntityId, skill: String },

    #[error("skill '{0}' is not in the skill catalog")]
    UnknownSkill(String),

    #[error("entity {0} is not in the roster")]
    UnknownEntity(EntityId),

    #[error("{target} is not a valid target for {actor} (group {group})")]
    InvalidTarget {
        actor: EntityId,
        target: EntityId,
        group: TargetGroup,
    },

    #[error("{0} is dead and cannot act")]
    SourceDead(EntityId),

    #[error("{operation} is not allowed in phase {phase:?}")]
    WrongPhase {
        operation: &'static str,
        phase: BattlePhase,
    },
}

impl BattleError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            InvalidTarget { .. } | SourceDead(_) => ErrorSeverity::Recoverable,
            SkillNotInSkillset { .. } | UnknownSkill(_) | UnknownEntity(_) => {
                ErrorSeverity::Validation
            }
            WrongPhase { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            SkillNotInSkillset { .. } => "MOVE_SKILL_NOT_IN_SKILLSET",
            UnknownSkill(_) => "MOVE_UNKNOWN_SKILL",
            UnknownEntity(_) => "MOVE_UNKNOWN_ENTITY",
            InvalidTarget { .. } => "MOVE_INVALID_TARGET",
            SourceDead(_) => "MOVE_SOURCE_DEAD",
            WrongPhase { .. } => "MOVE_WRONG_PHASE",
        }
    }
}
