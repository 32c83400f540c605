//! [`battle_core::SkillOracle`] backed by an in-memory map.
use battle_core::{SkillDefinition, SkillOracle};
use std::collections::HashMap;

/// SkillOracle implementation with static skill definitions
#[derive(Debug, Clone)]
pub struct SkillOracleImpl {
    definitions: HashMap<String, SkillDefinition>,
}

impl SkillOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Add a skill definition, replacing any previous one with the same name
    pub fn add_definition(&mut self, def: SkillDefinition) {
        self.definitions.insert(def.name.clone(), def);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for SkillOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<SkillDefinition> for SkillOracleImpl {
    fn from_iter<I: IntoIterator<Item = SkillDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for def in iter {
            oracle.add_definition(def);
        }
        oracle
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.definitions.get(name)
    }
}
