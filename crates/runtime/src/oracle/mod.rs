//! Runtime wrappers around static battle content.
//!
//! These implementations expose `battle-core` oracle traits and bundle them
//! into a [`BattleCatalog`] so the runtime can build [`BattleEnv`] views on
//! demand. The data is immutable at runtime; dynamic state lives in the
//! engine's roster.
mod entities;
mod skills;

use std::sync::Arc;

use battle_content::ContentCatalog;
use battle_core::{
    ArenaDefinition, BattleEnv, ConfigError, EntityDefinition, EntityOracle, SkillDefinition,
    SkillOracle,
};

pub use entities::EntityOracleImpl;
pub use skills::SkillOracleImpl;

/// Shared, validated view over skills, entities and arenas.
///
/// Cloning is cheap; every clone points at the same definitions.
#[derive(Clone, Debug)]
pub struct BattleCatalog {
    pub(crate) skills: Arc<SkillOracleImpl>,
    pub(crate) entities: Arc<EntityOracleImpl>,
    pub(crate) arenas: Arc<Vec<ArenaDefinition>>,
}

impl BattleCatalog {
    /// Creates a catalog after checking every entity against the skill table.
    pub fn new(
        skills: SkillOracleImpl,
        entities: EntityOracleImpl,
        arenas: Vec<ArenaDefinition>,
    ) -> Result<Self, ConfigError> {
        for def in entities.definitions() {
            def.validate(&skills)?;
        }
        Ok(Self {
            skills: Arc::new(skills),
            entities: Arc::new(entities),
            arenas: Arc::new(arenas),
        })
    }

    pub fn from_definitions(
        skills: impl IntoIterator<Item = SkillDefinition>,
        entities: impl IntoIterator<Item = EntityDefinition>,
        arenas: Vec<ArenaDefinition>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            skills.into_iter().collect(),
            entities.into_iter().collect(),
            arenas,
        )
    }

    /// Builds the catalog from loaded content. Rules are not part of the catalog.
    pub fn from_content(content: ContentCatalog) -> Result<Self, ConfigError> {
        Self::from_definitions(content.skills, content.entities, content.arenas)
    }

    /// Borrowed view handed to the battle engine
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        BattleEnv::new(self.skills.as_ref(), self.entities.as_ref())
    }

    pub fn skills(&self) -> &SkillOracleImpl {
        &self.skills
    }

    pub fn entities(&self) -> &EntityOracleImpl {
        &self.entities
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.skill(name)
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.entity(name)
    }

    pub fn arenas(&self) -> &[ArenaDefinition] {
        &self.arenas
    }

    pub fn arena(&self, name: &str) -> Option<&ArenaDefinition> {
        self.arenas.iter().find(|arena| arena.name == name)
    }

    pub fn require_arena(&self, name: &str) -> Result<&ArenaDefinition, ConfigError> {
        self.arena(name)
            .ok_or_else(|| ConfigError::UnknownArena(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DamageType, EntityStats, SkillStats, TargetGroup};

    fn slash() -> SkillDefinition {
        SkillDefinition::new(
            "Slash",
            SkillStats::new(DamageType::PHYSICAL, 1.0, TargetGroup::Enemies),
        )
    }

    #[test]
    fn rejects_entities_with_unknown_skills() {
        let knight = EntityDefinition::new(
            "Knight",
            EntityStats::new(50.0, 0.0),
            vec!["Slash".into(), "Whirlwind".into()],
        );
        let err = BattleCatalog::from_definitions([slash()], [knight], Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingSkillInSkillset {
                entity: "Knight".into(),
                skill: "Whirlwind".into(),
            }
        );
    }

    #[test]
    fn env_view_resolves_definitions() {
        let knight =
            EntityDefinition::new("Knight", EntityStats::new(50.0, 0.0), vec!["Slash".into()]);
        let catalog = BattleCatalog::from_definitions([slash()], [knight], Vec::new()).unwrap();

        let env = catalog.as_battle_env();
        assert!(env.skills().skill("Slash").is_some());
        assert!(env.entities().entity("Knight").is_some());
        assert_eq!(
            catalog.require_arena("Nowhere").unwrap_err(),
            ConfigError::UnknownArena("Nowhere".into())
        );
    }
}
