//! Skill catalog loader.

use std::path::Path;

use battle_core::SkillDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill catalog from a RON file.
    ///
    /// Skill names must be unique within the file.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        ensure_unique("skill", catalog.skills.iter().map(|s| s.name.as_str()))?;
        Ok(catalog.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DamageType, TargetGroup};

    #[test]
    fn parses_flags_groups_and_defaults() {
        let skills = SkillLoader::parse(
            r#"SkillCatalog(skills: [
                (name: "Firebolt", stats: (damage_type: "FIRE | ARCANE", power: 2.0, resource_cost: 5.0, target_group: Enemies)),
                (name: "Mend", stats: (power: -8.0, target_group: AllButDead)),
            ])"#,
        )
        .unwrap();

        assert_eq!(skills.len(), 2);
        assert_eq!(
            skills[0].stats.damage_type,
            DamageType::FIRE | DamageType::ARCANE
        );
        assert_eq!(skills[0].stats.resource_cost, 5.0);
        assert_eq!(skills[1].stats.damage_type, DamageType::empty());
        assert_eq!(skills[1].stats.target_group, TargetGroup::AllButDead);
        assert!(skills[1].stats.is_healing());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = SkillLoader::parse(
            r#"SkillCatalog(skills: [
                (name: "Slash", stats: (power: 1.0, target_group: Enemies)),
                (name: "Slash", stats: (power: 2.0, target_group: Enemies)),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Slash"));
    }

    #[test]
    fn unknown_target_group_fails_to_parse() {
        let err = SkillLoader::parse(
            r#"SkillCatalog(skills: [(name: "Odd", stats: (power: 1.0, target_group: Everyone))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse skill catalog"));
    }
}
