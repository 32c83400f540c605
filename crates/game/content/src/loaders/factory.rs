//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use battle_core::{
    Arena, ArenaDefinition, BattleConfig, CatalogSnapshot, ConfigError, EntityDefinition,
    SkillDefinition,
};

use crate::loaders::{ArenaLoader, EntityLoader, LoadResult, RulesLoader, SkillLoader};

/// Everything needed to set up battles, loaded and cross-checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentCatalog {
    pub skills: Vec<SkillDefinition>,
    pub entities: Vec<EntityDefinition>,
    pub arenas: Vec<ArenaDefinition>,
    pub rules: BattleConfig,
}

impl ContentCatalog {
    /// Checks cross-file references.
    ///
    /// Every entity's stats must be in range and its skillset must name known
    /// skills; every arena must have at least one slot per faction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let snapshot = CatalogSnapshot::new(self.skills.clone(), Vec::new());
        for entity in &self.entities {
            entity.validate(&snapshot)?;
        }
        for arena in &self.arenas {
            Arena::from_definition(arena).validate()?;
        }
        Ok(())
    }

    /// Splits off the skill and entity tables as a core catalog snapshot.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::new(self.skills.clone(), self.entities.clone())
    }
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── skills.ron
/// ├── entities.ron
/// └── arenas.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the sample content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load battle rules from `rules.toml`, falling back to defaults if the file is absent.
    pub fn load_rules(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        RulesLoader::load(&path)
    }

    /// Load skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load entity definitions from `entities.ron`.
    pub fn load_entities(&self) -> LoadResult<Vec<EntityDefinition>> {
        let path = self.data_dir.join("entities.ron");
        EntityLoader::load(&path)
    }

    /// Load arena layouts from `arenas.ron`.
    pub fn load_arenas(&self) -> LoadResult<Vec<ArenaDefinition>> {
        let path = self.data_dir.join("arenas.ron");
        ArenaLoader::load(&path)
    }

    /// Load every file and validate references between them.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let catalog = ContentCatalog {
            skills: self.load_skills()?,
            entities: self.load_entities()?,
            arenas: self.load_arenas()?,
            rules: self.load_rules()?,
        };
        catalog.validate()?;
        tracing::debug!(
            skills = catalog.skills.len(),
            entities = catalog.entities.len(),
            arenas = catalog.arenas.len(),
            "Loaded content from {}",
            self.data_dir.display()
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{EntityOracle, Faction, Region};

    const SKILLS: &str = r#"SkillCatalog(skills: [
        (name: "Slash", stats: (damage_type: "PHYSICAL", power: 1.0, target_group: Enemies)),
    ])"#;

    const ENTITIES: &str = r#"EntityCatalog(entities: [
        (name: "Knight", stats: (max_health: 30.0, strength: 5.0, speed: 2.0), skillset: ["Slash"]),
        (name: "Wolf", stats: (max_health: 12.0, strength: 3.0, speed: 4.0), skillset: ["Slash"], region: "FOREST"),
    ])"#;

    const ARENAS: &str = r#"ArenaCatalog(arenas: [
        (name: "Glade", region: "FOREST", slots: [
            (priority: 0, faction: Ally),
            (priority: 0, faction: Enemy),
        ]),
    ])"#;

    fn write_data(dir: &Path, entities: &str) {
        std::fs::write(dir.join("skills.ron"), SKILLS).unwrap();
        std::fs::write(dir.join("entities.ron"), entities).unwrap();
        std::fs::write(dir.join("arenas.ron"), ARENAS).unwrap();
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_catalog_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path(), ENTITIES);
        std::fs::write(dir.path().join("rules.toml"), "round_limit = 20\n").unwrap();

        let catalog = ContentFactory::new(dir.path()).load_catalog().unwrap();
        assert_eq!(catalog.skills.len(), 1);
        assert_eq!(catalog.rules.round_limit, Some(20));
        assert_eq!(
            Arena::from_definition(&catalog.arenas[0]).capacity(Faction::Enemy),
            1
        );

        let snapshot = catalog.snapshot();
        let forest: Vec<_> = snapshot
            .entities_in(Region::FOREST, None)
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(forest, vec!["Wolf"]);
    }

    #[test]
    fn missing_rules_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path(), ENTITIES);
        let catalog = ContentFactory::new(dir.path()).load_catalog().unwrap();
        assert_eq!(catalog.rules, BattleConfig::default());
    }

    #[test]
    fn unknown_skill_in_skillset_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_data(
            dir.path(),
            r#"EntityCatalog(entities: [
                (name: "Mage", stats: (max_health: 10.0), skillset: ["Fireball"]),
            ])"#,
        );

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        let config = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(
            config,
            &ConfigError::MissingSkillInSkillset {
                entity: "Mage".into(),
                skill: "Fireball".into(),
            }
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }

    #[test]
    fn bundled_content_is_valid() {
        let catalog = ContentFactory::bundled().load_catalog().unwrap();
        assert!(!catalog.skills.is_empty());
        assert!(!catalog.arenas.is_empty());
        let pool = catalog.snapshot();
        for arena in &catalog.arenas {
            assert!(
                !pool
                    .entities_in(arena.region, Some(arena.area.as_str()))
                    .is_empty(),
                "arena {} has nothing to spawn",
                arena.name
            );
        }
    }
}
