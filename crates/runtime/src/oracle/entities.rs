//! [`battle_core::EntityOracle`] that keeps catalog order for spawn pools.
use battle_core::{EntityDefinition, EntityOracle, Region};
use std::collections::HashMap;

/// EntityOracle implementation with static entity definitions.
///
/// Definitions are kept in insertion order so region queries are stable for a
/// given catalog, with a name index for direct lookups.
#[derive(Debug, Clone, Default)]
pub struct EntityOracleImpl {
    definitions: Vec<EntityDefinition>,
    index: HashMap<String, usize>,
}

impl EntityOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity definition, replacing any previous one with the same name
    pub fn add_definition(&mut self, def: EntityDefinition) {
        match self.index.get(&def.name) {
            Some(&slot) => self.definitions[slot] = def,
            None => {
                self.index.insert(def.name.clone(), self.definitions.len());
                self.definitions.push(def);
            }
        }
    }

    pub fn definitions(&self) -> &[EntityDefinition] {
        &self.definitions
    }
}

impl FromIterator<EntityDefinition> for EntityOracleImpl {
    fn from_iter<I: IntoIterator<Item = EntityDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for def in iter {
            oracle.add_definition(def);
        }
        oracle
    }
}

impl EntityOracle for EntityOracleImpl {
    fn entity(&self, name: &str) -> Option<&EntityDefinition> {
        self.index.get(name).map(|&slot| &self.definitions[slot])
    }

    fn entities_in(&self, region: Region, area: Option<&str>) -> Vec<&EntityDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.found_in(region, area))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::EntityStats;

    fn def(name: &str, region: Region, area: &str) -> EntityDefinition {
        EntityDefinition::new(name, EntityStats::new(10.0, 0.0), Vec::new())
            .with_location(region, area)
    }

    #[test]
    fn region_queries_keep_insertion_order() {
        let oracle: EntityOracleImpl = [
            def("Wolf", Region::FOREST | Region::ICE, "glade, frozen lake"),
            def("Yeti", Region::ICE, "north peak"),
            def("Scorpion", Region::DESERT, "dunes"),
            def("Ice Wisp", Region::ICE, "frozen lake"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = oracle
            .entities_in(Region::ICE, Some("frozen lake"))
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Wolf", "Ice Wisp"]);

        let anywhere_icy: Vec<_> = oracle
            .entities_in(Region::ICE, None)
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(anywhere_icy, ["Wolf", "Yeti", "Ice Wisp"]);
    }

    #[test]
    fn redefinition_replaces_in_place() {
        let mut oracle = EntityOracleImpl::new();
        oracle.add_definition(def("Yeti", Region::ICE, "north peak"));
        oracle.add_definition(def("Scorpion", Region::DESERT, "dunes"));
        oracle.add_definition(def("Yeti", Region::ICE, "frozen lake"));

        assert_eq!(oracle.definitions().len(), 2);
        assert_eq!(oracle.definitions()[0].area, "frozen lake");
        assert_eq!(oracle.entity("Yeti").map(|d| d.area.as_str()), Some("frozen lake"));
        assert!(oracle.entity("Goblin").is_none());
    }
}
