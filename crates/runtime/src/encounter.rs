//! Encounter generation: arena choice, party placement and random enemies.

use battle_core::{Arena, ConfigError, EntityOracle, Faction, compute_seed};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::api::Result;
use crate::context::BattleContext;
use crate::oracle::BattleCatalog;

/// Seed stream reserved for encounter generation.
const ENCOUNTER_STREAM: u32 = 0xE4C0;

/// Builds a [`BattleContext`] ready to be handed to the runtime.
///
/// Without an explicit arena one is drawn uniformly from the catalog. Without
/// an explicit enemy list, `1..=enemy capacity` enemies are drawn uniformly
/// (with repetition) from the definitions found in the arena's region and area.
#[derive(Debug, Clone)]
pub struct EncounterBuilder {
    catalog: BattleCatalog,
    arena: Option<String>,
    party: Vec<String>,
    enemies: Option<Vec<String>>,
    seed: u64,
}

impl EncounterBuilder {
    pub fn new(catalog: BattleCatalog) -> Self {
        Self {
            catalog,
            arena: None,
            party: Vec::new(),
            enemies: None,
            seed: 0,
        }
    }

    pub fn arena(mut self, name: impl Into<String>) -> Self {
        self.arena = Some(name.into());
        self
    }

    pub fn party<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.party = names.into_iter().map(Into::into).collect();
        self
    }

    /// Fixes the enemy line-up instead of drawing it.
    pub fn enemies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enemies = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<BattleContext> {
        let mut rng = StdRng::seed_from_u64(compute_seed(self.seed, 0, 0, ENCOUNTER_STREAM));

        let definition = match &self.arena {
            Some(name) => self.catalog.require_arena(name)?,
            None => self
                .catalog
                .arenas()
                .choose(&mut rng)
                .ok_or(ConfigError::NoArenas)?,
        };
        let arena = Arena::from_definition(definition);
        arena.validate()?;
        tracing::info!(arena = %arena.name, region = ?arena.region, "arena selected");

        let enemies = match self.enemies {
            Some(enemies) => enemies,
            None => {
                let area = (!arena.area.is_empty()).then_some(arena.area.as_str());
                let pool = self.catalog.entities().entities_in(arena.region, area);
                if pool.is_empty() {
                    return Err(ConfigError::EmptySpawnPool {
                        arena: arena.name.clone(),
                    }
                    .into());
                }
                let count = rng.gen_range(1..=arena.capacity(Faction::Enemy));
                (0..count)
                    .filter_map(|_| pool.choose(&mut rng).map(|def| def.name.clone()))
                    .collect()
            }
        };

        let mut context = BattleContext::new(self.catalog.clone(), arena)?;
        context.spawn_many(&self.party, Faction::Ally)?;
        context.spawn_many(&enemies, Faction::Enemy)?;

        tracing::debug!(
            allies = self.party.len(),
            enemies = enemies.len(),
            "encounter ready"
        );
        Ok(context)
    }
}
