//! Configuration errors.
//!
//! Errors surfaced while setting up a battle from catalog data. None of them
//! can happen once a battle has started.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::Faction;
use crate::stats::StatsError;

/// Catalog or arena data that cannot be used to start a battle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("unknown entity definition '{0}'")]
    UnknownEntity(String),

    #[error("unknown arena '{0}'")]
    UnknownArena(String),

    #[error("entity '{entity}' lists skill '{skill}' which is not in the skill catalog")]
    MissingSkillInSkillset { entity: String, skill: String },

    #[error("entity '{entity}' has invalid stats: {source}")]
    InvalidStats {
        entity: String,
        #[source]
        source: StatsError,
    },

    #[error("{kind} '{name}' is defined more than once")]
    DuplicateDefinition { kind: &'static str, name: String },

    #[error("arena '{arena}' has no spawn slots for faction {faction}")]
    NoSlotsForFaction { arena: String, faction: Faction },

    #[error("battle has no {faction} combatants")]
    NoCombatants { faction: Faction },

    #[error("arena '{arena}' has no entity definitions to spawn from")]
    EmptySpawnPool { arena: String },

    #[error("catalog has no arenas")]
    NoArenas,
}

impl BattleError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        // Every configuration problem stops the battle from starting.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            UnknownSkill(_) => "CONFIG_UNKNOWN_SKILL",
            UnknownEntity(_) => "CONFIG_UNKNOWN_ENTITY",
            UnknownArena(_) => "CONFIG_UNKNOWN_ARENA",
            MissingSkillInSkillset { .. } => "CONFIG_MISSING_SKILL_IN_SKILLSET",
            InvalidStats { .. } => "CONFIG_INVALID_STATS",
            DuplicateDefinition { .. } => "CONFIG_DUPLICATE_DEFINITION",
            NoSlotsForFaction { .. } => "CONFIG_NO_SLOTS_FOR_FACTION",
            NoCombatants { .. } => "CONFIG_NO_COMBATANTS",
            EmptySpawnPool { .. } => "CONFIG_EMPTY_SPAWN_POOL",
            NoArenas => "CONFIG_NO_ARENAS",
        }
    }
}
