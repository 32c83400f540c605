//! Traits describing read-only battle data.
//!
//! Oracles expose the skill and entity catalogs plus the random source. The
//! [`BattleEnv`] aggregate bundles the catalogs so the engine can look up
//! definitions without hard coupling to a concrete storage.
mod catalog;
mod error;
mod rng;

pub use catalog::{CatalogSnapshot, EntityDefinition, EntityOracle, SkillOracle};
pub use error::ConfigError;
pub use rng::{PcgRng, RngOracle, SequenceRng, compute_seed};

/// Read-only catalogs the engine consults while validating and resolving moves.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    skills: &'a dyn SkillOracle,
    entities: &'a dyn EntityOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(skills: &'a dyn SkillOracle, entities: &'a dyn EntityOracle) -> Self {
        Self { skills, entities }
    }

    /// Builds an environment from a single value serving both catalogs.
    pub fn from_catalog<C>(catalog: &'a C) -> Self
    where
        C: SkillOracle + EntityOracle,
    {
        Self::new(catalog, catalog)
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn entities(&self) -> &'a dyn EntityOracle {
        self.entities
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
