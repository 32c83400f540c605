//! Entity and skill definitions and the oracles that serve them.
//!
//! Definitions are static: they are loaded once (see the `battle-content`
//! crate) and looked up by name when entities spawn and moves resolve.

use crate::arena::Region;
use crate::stats::{EntityStats, SkillDefinition};

use super::ConfigError;

/// Static definition an entity is spawned from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDefinition {
    pub name: String,
    pub stats: EntityStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skillset: Vec<String>,
    /// Regions this entity can be encountered in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub region: Region,
    /// Free-text area inside the region(s). Empty means "anywhere".
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: String,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>, stats: EntityStats, skillset: Vec<String>) -> Self {
        Self {
            name: name.into(),
            stats,
            skillset,
            region: Region::empty(),
            area: String::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, region: Region, area: impl Into<String>) -> Self {
        self.region = region;
        self.area = area.into();
        self
    }

    /// True if this definition can appear in `region`, optionally narrowed to an area.
    ///
    /// The region masks only need to overlap. The area filter is a substring
    /// match and is skipped when `area` is `None` or empty.
    pub fn found_in(&self, region: Region, area: Option<&str>) -> bool {
        if !self.region.intersects(region) {
            return false;
        }
        match area {
            Some(area) if !area.is_empty() => self.area.contains(area),
            _ => true,
        }
    }

    /// Checks stats ranges and that every skillset entry exists in `skills`.
    pub fn validate(&self, skills: &(impl SkillOracle + ?Sized)) -> Result<(), ConfigError> {
        self.stats
            .validate()
            .map_err(|source| ConfigError::InvalidStats {
                entity: self.name.clone(),
                source,
            })?;

        if let Some(missing) = self.skillset.iter().find(|s| skills.skill(s).is_none()) {
            return Err(ConfigError::MissingSkillInSkillset {
                entity: self.name.clone(),
                skill: missing.clone(),
            });
        }
        Ok(())
    }
}

/// Lookup of skill definitions by name.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, name: &str) -> Option<&SkillDefinition>;

    /// Like [`SkillOracle::skill`] but reports a missing skill as a config error.
    fn require_skill(&self, name: &str) -> Result<&SkillDefinition, ConfigError> {
        self.skill(name)
            .ok_or_else(|| ConfigError::UnknownSkill(name.to_owned()))
    }
}

/// Lookup of entity definitions by name and by location.
pub trait EntityOracle: Send + Sync {
    fn entity(&self, name: &str) -> Option<&EntityDefinition>;

    /// All definitions found in `region` (and `area`, if given), in catalog order.
    fn entities_in(&self, region: Region, area: Option<&str>) -> Vec<&EntityDefinition>;

    fn require_entity(&self, name: &str) -> Result<&EntityDefinition, ConfigError> {
        self.entity(name)
            .ok_or_else(|| ConfigError::UnknownEntity(name.to_owned()))
    }
}

/// Plain in-memory catalog backed by vectors.
///
/// Lookups are linear; this is meant for tests, tools and serialized battle
/// records. Long-running hosts index definitions instead.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    pub skills: Vec<SkillDefinition>,
    pub entities: Vec<EntityDefinition>,
}

impl CatalogSnapshot {
    pub fn new(skills: Vec<SkillDefinition>, entities: Vec<EntityDefinition>) -> Self {
        Self { skills, entities }
    }

    /// Validates every entity definition against the skill list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.entities.iter().try_for_each(|e| e.validate(self))
    }
}

impl SkillOracle for CatalogSnapshot {
    fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.name == name)
    }
}

impl EntityOracle for CatalogSnapshot {
    fn entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.iter().find(|e| e.name == name)
    }

    fn entities_in(&self, region: Region, area: Option<&str>) -> Vec<&EntityDefinition> {
        self.entities
            .iter()
            .filter(|e| e.found_in(region, area))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{DamageType, SkillStats};
    use crate::targeting::TargetGroup;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![SkillDefinition::new(
                "Slash",
                SkillStats::new(DamageType::PHYSICAL, 1.0, TargetGroup::Enemies),
            )],
            vec![
                EntityDefinition::new("Yeti", EntityStats::new(30.0, 0.0), vec!["Slash".into()])
                    .with_location(Region::ICE, "north peak"),
                EntityDefinition::new("Scorpion", EntityStats::new(20.0, 0.0), vec![])
                    .with_location(Region::DESERT | Region::FOREST, "dunes"),
            ],
        )
    }

    #[test]
    fn region_masks_only_need_to_overlap() {
        let catalog = catalog();
        let names: Vec<_> = catalog
            .entities_in(Region::FOREST | Region::ICE, None)
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Yeti", "Scorpion"]);
    }

    #[test]
    fn area_filter_is_a_substring_match() {
        let catalog = catalog();
        assert_eq!(catalog.entities_in(Region::ICE, Some("peak")).len(), 1);
        assert!(catalog.entities_in(Region::ICE, Some("dunes")).is_empty());
        assert_eq!(catalog.entities_in(Region::ICE, Some("")).len(), 1);
    }

    #[test]
    fn skillset_must_reference_known_skills() {
        let mut catalog = catalog();
        assert!(catalog.validate().is_ok());

        catalog.entities[0].skillset.push("Fireball".into());
        assert_eq!(
            catalog.validate(),
            Err(ConfigError::MissingSkillInSkillset {
                entity: "Yeti".into(),
                skill: "Fireball".into(),
            })
        );
    }

    #[test]
    fn require_reports_unknown_names() {
        let catalog = catalog();
        assert!(catalog.require_skill("Slash").is_ok());
        assert_eq!(
            catalog.require_entity("Dragon").unwrap_err(),
            ConfigError::UnknownEntity("Dragon".into())
        );
    }
}
